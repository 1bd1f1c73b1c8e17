use clap::Parser;
use eframe::egui;
use tracing::Level;

use labelizer::app::LabelizerApp;

#[derive(Debug, Parser)]
#[command(name = "labelizer", version, about = "Draw bounding boxes on an image.")]
struct Args {
    /// Image to annotate: a file path or an http(s) URL
    image: String,

    /// Log at debug level
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> eframe::Result {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    let title = format!("labelizer — {}", args.image);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 480.0])
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(LabelizerApp::new(&cc.egui_ctx, &args.image)))),
    )
}
