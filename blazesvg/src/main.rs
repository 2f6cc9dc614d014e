use blazesvg_lib::blaze_optimize::blaze_svg_optimize;
use blazesvg_lib::Options;
use clap::Parser;
use std::fs;

const BLAZESVG_INTRO: &str = r#"
    BlazeSVG - inline styles in, shared classes out.
"#;

#[derive(Parser)]
#[command(name = "BlazeSVG")]
#[command(about = "Move inline SVG styles into shared CSS classes")]
struct Args {
    /// Input file name.
    input: String,

    /// Output file name.
    output: String,

    /// Spaces per indentation level in the generated stylesheet.
    #[arg(long, default_value_t = 4)]
    indent: usize,

    /// Decimal digits numeric values are rounded to.
    #[arg(long, default_value_t = 3)]
    float_precision: u32,

    /// Keep the leading zero in values like 0.5.
    #[arg(long)]
    no_leading_zero: bool,

    /// Keep explicit px units.
    #[arg(long)]
    no_default_px: bool,

    /// Never rewrite cm, mm, in, pt or pc values as pixels.
    #[arg(long)]
    no_convert_to_px: bool,

    /// Property to drop from every generated class (repeatable).
    #[arg(long = "remove-css-style", value_name = "PROPERTY")]
    remove_css_styles: Vec<String>,
}

impl Args {
    fn options(&self) -> Options {
        Options {
            indent: self.indent,
            remove_css_styles: self.remove_css_styles.clone(),
            float_precision: self.float_precision,
            leading_zero: !self.no_leading_zero,
            default_px: !self.no_default_px,
            convert_to_px: !self.no_convert_to_px,
        }
    }
}

fn main() {
    env_logger::init();
    println!("{}", BLAZESVG_INTRO);

    // parse the args given in terminal
    let args: Args = Args::parse();

    let svg_content = match fs::read_to_string(&args.input) {
        Ok(svg_content) => svg_content,
        Err(e) => {
            eprintln!("Error reading SVG file: {}", e);
            std::process::exit(1);
        }
    };

    let (output, report) =
        match blaze_svg_optimize::optimize_with_report(&svg_content, &args.options()) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Error optimizing SVG: {}", e);
                std::process::exit(1);
            }
        };

    if let Err(e) = fs::write(&args.output, &output) {
        eprintln!("Error writing output file: {}", e);
        std::process::exit(1);
    }

    log::info!("Wrote {} bytes to {}", output.len(), args.output);
    println!(
        "Moved {} inline styles into {} classes ({} -> {} bytes).",
        report.nodes_rewritten,
        report.classes,
        svg_content.len(),
        output.len()
    );
}
