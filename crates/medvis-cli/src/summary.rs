use std::path::Path;

use console::Style;
use medvis_core::config::MedvisConfig;
use medvis_core::pipeline::Finding;

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

pub fn print_process_summary(input: &Path, output: &Path, config: &MedvisConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("MedVis Analysis"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(15)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Size limit"),
        s.value.apply_to(format!("{} MB", config.upload.max_size_mb))
    );
    println!();

    let script = &config.pipeline;
    println!("  {}", s.header.apply_to("Script"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Upload"),
        s.value.apply_to(format!(
            "+{}% every {} ms",
            config.sequencer.upload_increment, config.sequencer.upload_tick_ms
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Steps"),
        s.value
            .apply_to(format!("{} x {} ms", script.steps, script.step_interval_ms))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Finalize"),
        s.value.apply_to(format!("{} ms", script.finalize_delay_ms))
    );
    println!();

    let overlay = &script.overlay;
    println!("  {}", s.header.apply_to("Overlay"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Findings"),
        s.value
            .apply_to(format!("{}-{}", overlay.min_findings, overlay.max_findings))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Radius"),
        s.value
            .apply_to(format!("{}-{} px", overlay.min_radius, overlay.max_radius))
    );
    match overlay.seed {
        Some(seed) => println!(
            "    {:<12}{}",
            s.label.apply_to("Seed"),
            s.value.apply_to(seed)
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Seed"),
            s.disabled.apply_to("random")
        ),
    }
    match overlay.label_font {
        Some(ref font) => println!(
            "    {:<12}{}",
            s.label.apply_to("Font"),
            s.path.apply_to(font.display())
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Font"),
            s.disabled.apply_to("bundled")
        ),
    }
    println!();
}

pub fn print_findings(findings: &[Finding]) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Findings"));
    for (i, f) in findings.iter().enumerate() {
        println!(
            "    {}. {} at ({:.0}, {:.0}), r = {:.0} px",
            s.label.apply_to(i + 1),
            s.value.apply_to(&f.label),
            f.center.0,
            f.center.1,
            f.radius
        );
    }
}
