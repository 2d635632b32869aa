use phototagger::{
    AppError, ImagePayload, PhotoTagger, TaggerConfig, UploadResult, config::DEFAULT_CONFIG_FILE,
};
use tokio::sync::oneshot;
use tracing::{Level, info};

fn init_logging() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
}

fn show_results(result: &UploadResult) {
    if result.tags.is_empty() {
        println!("No tags found");
    }
    for tag in &result.tags {
        println!("{}", tag);
    }
    for color in &result.colors {
        println!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue);
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    init_logging();
    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| AppError::Usage("phototagger <image-path>".to_string()))?;
    let configuration = TaggerConfig::load(DEFAULT_CONFIG_FILE)?;
    let payload = ImagePayload::open(&path)?;

    let (tagger, callbacks) = PhotoTagger::builder(configuration).build()?;
    let (done_tx, done_rx) = oneshot::channel();
    info!("Uploading {}", path);
    tagger.upload(
        payload,
        |fraction| println!("Uploading... {:>3.0}%", fraction * 100.0),
        move |outcome| {
            let _ = done_tx.send(outcome);
        },
    );

    // The queue drains once the upload task and the tagger have both let go.
    drop(tagger);
    callbacks.run().await;

    let outcome = done_rx.await.map_err(|_| AppError::Incomplete)?;
    show_results(&outcome?);
    Ok(())
}
