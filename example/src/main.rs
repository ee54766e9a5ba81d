use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use range_slider::{
    HandleSlot, RangeSlider, RangeSliderArgs,
    dom::ElementKind,
    event::Key,
    page::Page,
    slider::{FILL_END, FILL_START, HANDLE_POSITION},
};
use serde::Deserialize;

const DEFAULT_CONFIG: &str = include_str!("../sliders.json");

const TRACK_WIDTH: f64 = 300.0;
const HANDLE_WIDTH: f64 = 10.0;

#[derive(Parser)]
#[command(name = "range-slider-demo")]
#[command(version, about = "Drives two headless sliders through scripted input", long_about = None)]
struct Cli {
    /// JSON file with `price` and `volume` slider configurations
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Deserialize)]
struct DemoConfig {
    price: RangeSliderArgs,
    volume: RangeSliderArgs,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => DEFAULT_CONFIG.to_owned(),
    };
    let config: DemoConfig =
        serde_json::from_str(&config).context("failed to parse slider configuration")?;

    let mut page = Page::new();
    mount_point(&mut page, "price");
    mount_point(&mut page, "volume");

    let price_args = config
        .price
        .on_drag(|percentage| tracing::info!(percentage, "price handle dragged"));
    let price = RangeSlider::mount(&mut page, "#price", price_args)?;
    let volume = RangeSlider::mount(&mut page, "#volume", config.volume)?;
    layout(&mut page, &price);
    layout(&mut page, &volume);
    report("price", &page, &price);
    report("volume", &page, &volume);

    // Drag the lower price handle to the middle of the track. Moves within
    // one frame collapse into a single update.
    let lower = price.handles()[HandleSlot::Lower.index()];
    page.press(lower, 40.0);
    page.move_pointer(120.0);
    page.move_pointer(160.0);
    let frames = page.run_frame();
    page.release();
    tracing::info!(frames, "drag frame flushed");
    report("price", &page, &price);

    if let Some(last) = price.segments().last().copied() {
        page.click(last);
        report("price", &page, &price);
    }

    // Typing an upper value below the lower one swaps the pair.
    let upper_input = price.inputs()[HandleSlot::Upper.index()];
    page.type_text(upper_input, "120");
    report("price", &page, &price);

    page.press_key(lower, Key::ArrowLeft);
    report("price", &page, &price);

    let volume_handle = volume.handles()[HandleSlot::Lower.index()];
    page.press_key(volume_handle, Key::ArrowRight);
    report("volume", &page, &volume);

    let volume_input = volume.inputs()[HandleSlot::Lower.index()];
    page.type_text(volume_input, "abc72");
    report("volume", &page, &volume);

    Ok(())
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(
            "error,range_slider=info,range_slider_demo=info",
        ) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .try_init();
}

fn mount_point(page: &mut Page, id: &str) {
    let document = page.document_mut();
    let element = document.create_element(ElementKind::Container);
    document.set_dom_id(element, id);
    let root = document.root();
    document.append_child(root, element);
}

/// Stands in for the host's layout pass.
fn layout(page: &mut Page, slider: &RangeSlider) {
    let document = page.document_mut();
    document.set_width(slider.track(), TRACK_WIDTH);
    for handle in slider.handles() {
        document.set_width(handle, HANDLE_WIDTH);
    }
}

fn report(name: &str, page: &Page, slider: &RangeSlider) {
    let document = page.document();
    let inputs: Vec<&str> = slider
        .inputs()
        .iter()
        .map(|input| document.text(*input))
        .collect();
    let positions: Vec<&str> = slider
        .handles()
        .iter()
        .filter_map(|handle| document.style_property(*handle, HANDLE_POSITION))
        .collect();
    let track = slider.track();
    tracing::info!(
        slider = name,
        values = ?slider.values(),
        ?positions,
        fill_start = ?document.style_property(track, FILL_START),
        fill_end = ?document.style_property(track, FILL_END),
        ?inputs,
        "slider state"
    );
}
