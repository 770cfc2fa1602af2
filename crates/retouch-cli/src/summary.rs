use std::path::Path;

use console::Style;
use retouch_core::script::ReplaySummary;
use retouch_core::session::EditSession;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub struct ReplayReport<'a> {
    pub image: &'a Path,
    pub script: &'a Path,
    pub summary: &'a ReplaySummary,
    pub session: &'a EditSession,
    pub mask_path: Option<&'a Path>,
    pub cropped_path: Option<&'a Path>,
    pub annotations_path: Option<&'a Path>,
}

pub fn print_replay_summary(report: &ReplayReport<'_>) {
    let s = Styles::new();
    let session = report.session;

    println!();
    println!("  {}", s.title.apply_to("Retouch Replay"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(14)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Image"),
        s.path.apply_to(report.image.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Script"),
        s.path.apply_to(report.script.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Events"),
        s.value.apply_to(report.summary.events)
    );
    println!("  {:<14}{}", s.label.apply_to("Mode"), s.value.apply_to(session.mode()));
    println!();

    // Mask
    println!("  {}", s.header.apply_to("Mask"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Commits"),
        s.value.apply_to(report.summary.mask_commits)
    );
    match session.mask() {
        Some(mask) => {
            println!(
                "    {:<12}{}",
                s.label.apply_to("Selected"),
                s.value.apply_to(format!("{} px", mask.selected_count()))
            );
            if let Some(b) = mask.bounds() {
                println!(
                    "    {:<12}{}",
                    s.label.apply_to("Bounds"),
                    s.value
                        .apply_to(format!("{}x{} at ({}, {})", b.width(), b.height(), b.min_x, b.min_y))
                );
            }
        }
        None => println!("    {:<12}{}", s.label.apply_to("Selected"), s.disabled.apply_to("none")),
    }
    print_output(&s, report.mask_path);
    println!();

    // Crop
    println!("  {}", s.header.apply_to("Crop"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Commits"),
        s.value.apply_to(report.summary.crop_commits)
    );
    match (session.crop_region(), session.image()) {
        (Some(region), Some(image)) => {
            let r = region.to_pixels(image.width(), image.height());
            println!(
                "    {:<12}{}",
                s.label.apply_to("Region"),
                s.value
                    .apply_to(format!("{}x{} at ({}, {})", r.width, r.height, r.x, r.y))
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Aspect"),
                s.value.apply_to(session.crop_aspect_ratio())
            );
        }
        _ => println!("    {:<12}{}", s.label.apply_to("Region"), s.disabled.apply_to("full image")),
    }
    print_output(&s, report.cropped_path);
    println!();

    // Annotations
    println!("  {}", s.header.apply_to("Annotations"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Added"),
        s.value.apply_to(report.summary.annotations_added)
    );
    for a in session.annotations().iter() {
        let text = if a.text.is_empty() { "(empty)" } else { a.text.as_str() };
        println!(
            "    {:<12}{}",
            s.label.apply_to(format!("#{}", a.id)),
            s.value.apply_to(format!("({:.3}, {:.3}) {}", a.x, a.y, text))
        );
    }
    print_output(&s, report.annotations_path);
    println!();
}

fn print_output(s: &Styles, path: Option<&Path>) {
    if let Some(path) = path {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Saved"),
            s.path.apply_to(path.display())
        );
    }
}
