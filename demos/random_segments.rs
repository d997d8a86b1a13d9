use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use segsweep::generators;

#[derive(Clone, Copy, ValueEnum)]
enum Pattern {
    Checkerboard,
    SlantedCheckerboard,
    Slanties,
    Grid,
    Star,
}

#[derive(Parser)]
struct Args {
    #[arg(value_enum)]
    pattern: Pattern,

    #[arg(long, default_value_t = 10)]
    size: usize,

    /// Write an svg showing the segments and their intersections.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Also run the quadratic algorithm, and check that it agrees.
    #[arg(long)]
    check: bool,
}

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let segments = match args.pattern {
        Pattern::Checkerboard => generators::checkerboard(args.size),
        Pattern::SlantedCheckerboard => generators::slanted_checkerboard(args.size),
        Pattern::Slanties => generators::slanties(args.size),
        Pattern::Grid => generators::grid(args.size),
        Pattern::Star => generators::star(args.size),
    };

    let start = std::time::Instant::now();
    let records = segsweep::intersections(&segments);
    println!(
        "{} segments, {} intersections, {:?}",
        segments.len(),
        records.len(),
        start.elapsed()
    );

    if args.check {
        let start = std::time::Instant::now();
        let naive = segsweep::naive::intersections(&segments);
        println!("naive: {} intersections, {:?}", naive.len(), start.elapsed());
        let eps = segments.eps();
        let missing = naive
            .iter()
            .filter(|r| !records.iter().any(|s| s.approx_eq(r, eps)))
            .count();
        if missing > 0 || naive.len() != records.len() {
            anyhow::bail!("{missing} records differ from the naive algorithm");
        }
    }

    if let Some(output) = args.output {
        let mut bbox: Option<kurbo::Rect> = None;
        for seg in segments.segments() {
            let rect = seg.bounding_box();
            bbox = Some(bbox.map_or(rect, |b| b.union(rect)));
        }
        let document = segsweep_util::crossings_document(
            bbox.unwrap_or_default(),
            8.0,
            segments
                .segments()
                .map(|s| ((s.upper.x, s.upper.y), (s.lower.x, s.lower.y))),
            records.iter().map(|r| (r.point.x, r.point.y)),
        );
        svg::save(output, &document)?;
    }

    Ok(())
}
