use std::path::Path;

use console::Style;
use crownscan_core::geo::BoundingBox;
use crownscan_core::pipeline::config::AnalysisConfig;
use crownscan_core::pipeline::BatchSummary;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    warn: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            warn: Style::new().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_run_summary(config: &AnalysisConfig, bbox: &BoundingBox, out_dir: &Path) {
    let s = Styles::new();
    let bbox = bbox.normalized();

    println!();
    println!("  {}", s.title.apply_to("Crownscan Analysis"));
    println!(
        "  {}",
        s.title.apply_to(
            "\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}"
        )
    );
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Bounding box"),
        s.value.apply_to(format!(
            "({:.6}, {:.6}) .. ({:.6}, {:.6})",
            bbox.lon_min, bbox.lat_min, bbox.lon_max, bbox.lat_max
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("CRS"),
        s.value.apply_to(&config.data.coord_crs)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(out_dir.display())
    );
    println!();

    println!("  {}", s.header.apply_to("Imagery"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Pixel size"),
        s.value.apply_to(format!("{} m", config.data.pixel_size))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Tile size"),
        s.value.apply_to(format!("{} px", config.data.tile_size_px))
    );
    println!(
        "    {:<12}{:?}",
        s.label.apply_to("Index"),
        config.data.index
    );
    println!();

    println!("  {}", s.header.apply_to("Scale Space"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Radii"),
        s.value.apply_to(format!(
            "{} .. {} m, step {}",
            config.scale_space.minrad, config.scale_space.maxrad, config.scale_space.steprad
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Peak thresh"),
        s.value
            .apply_to(config.scale_space.threshold_rel_blob_peaks)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Overlap"),
        s.value.apply_to(config.scale_space.blob_overlap_threshold)
    );
    println!();
}

pub fn print_batch_result(summary: &BatchSummary, out_dir: &Path) {
    let s = Styles::new();

    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Tiles"),
        s.value.apply_to(format!(
            "{} total, {} analyzed, {} skipped",
            summary.total,
            summary.succeeded.len(),
            summary.skipped.len()
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Detections"),
        s.method.apply_to(summary.detections)
    );
    if !summary.failed.is_empty() {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Failed"),
            s.warn
                .apply_to(format!("{} (see failed.csv)", summary.failed.len()))
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Results"),
        s.path.apply_to(out_dir.join("results.csv").display())
    );
    println!();
}
