use std::path::PathBuf;

use clap::Parser;

use segsweep::Segments;

#[derive(Parser)]
struct Args {
    /// An svg file whose outlines will be checked for intersections.
    input: PathBuf,
    /// Where to write an svg showing the outlines and their intersections.
    output: PathBuf,

    /// How closely to approximate curves with line segments.
    #[arg(long, default_value_t = 0.1)]
    accuracy: f64,

    #[arg(long)]
    epsilon: Option<f64>,
}

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let input = std::fs::read_to_string(&args.input)?;
    let tree = usvg::Tree::from_str(&input, &usvg::Options::default())?;
    let paths = segsweep_util::svg_to_bezpaths(&tree);

    let mut segments = args
        .epsilon
        .map(Segments::with_eps)
        .unwrap_or_default();
    for path in &paths {
        segments.add_bez_path(path, args.accuracy)?;
    }

    let start = std::time::Instant::now();
    let records = segsweep::intersections(&segments);
    tracing::info!(
        segments = segments.len(),
        intersections = records.len(),
        elapsed = ?start.elapsed(),
        "swept"
    );
    for rec in &records {
        println!("{:?}", rec);
    }

    let bbox = segsweep_util::bounding_box(&paths);
    let document = segsweep_util::crossings_document(
        bbox,
        8.0,
        segments
            .segments()
            .map(|s| ((s.upper.x, s.upper.y), (s.lower.x, s.lower.y))),
        records.iter().map(|r| (r.point.x, r.point.y)),
    );
    svg::save(&args.output, &document)?;

    Ok(())
}
