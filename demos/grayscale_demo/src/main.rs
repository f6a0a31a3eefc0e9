use anyhow::{Context, Result};
use clap::Parser;
use satgray_math::{draw_rectangle, Fill, Grayscale};
use serde::Serialize;
use std::io::{self, BufRead, Write};

/// Saturating arithmetic on two random i16 images, then a rectangle drawn
/// onto a blank canvas.
///
/// Rectangle corners and fill value are prompted for on stdin unless all of
/// them are given on the command line.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
struct Args {
    /// Height of the random images
    #[arg(long, default_value_t = 3)]
    height: usize,

    /// Width of the random images
    #[arg(long, default_value_t = 3)]
    width: usize,

    /// Scalar operand for the image/number operations
    #[arg(long, default_value_t = 10)]
    scalar: i16,

    /// Seed for reproducible images (fresh entropy per image when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Side length of the square rectangle canvas
    #[arg(long, default_value_t = 10)]
    canvas: usize,

    /// Rectangle corner and fill: x1 y1 x2 y2 fill
    #[arg(long, num_args = 5, allow_negative_numbers = true, value_names = ["X1", "Y1", "X2", "Y2", "FILL"])]
    rect: Option<Vec<i64>>,

    /// Print a JSON summary instead of the images
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Serialize)]
struct Summary {
    width: usize,
    height: usize,
    scalar: i16,
    fill_coefficient_1: f64,
    fill_coefficient_2: f64,
    product_fill_coefficient: f64,
    images_equal: bool,
    canvas: Vec<String>,
}

struct Rect {
    x1: usize,
    y1: usize,
    x2: usize,
    y2: usize,
    fill: i16,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    // Failures are reported and the demo still exits cleanly.
    if let Err(err) = run(&args) {
        eprintln!("{}", report(&err));
    }
}

/// One-line description of a failure, including its context chain.
fn report(err: &anyhow::Error) -> String {
    format!("{:#}", err)
}

fn make_image(args: &Args, offset: u64) -> Grayscale<i16> {
    let fill = match args.seed {
        Some(seed) => Fill::Seeded(seed.wrapping_add(offset)),
        None => Fill::Random,
    };
    Grayscale::with_fill(args.height, args.width, fill)
}

fn run(args: &Args) -> Result<()> {
    let scalar = args.scalar;
    let img1 = make_image(args, 0);
    let img2 = make_image(args, 1);

    let sum_1 = &img1 + &img2;
    let sum_2 = scalar + &img1;

    let diff_1 = &img1 - &img2;
    let diff_2 = &img1 - scalar;
    let diff_3 = scalar - &img1;

    let product_1 = img1.multiply(&img2)?;
    let product_2 = &img1 * scalar;

    if !args.json {
        println!("image 1\n{}", img1);
        println!("image 2\n{}", img2);
        println!("sum of images\n{}", sum_1);
        println!("sum of image 1 and number\n{}", sum_2);
        println!("difference of images\n{}", diff_1);
        println!("difference of image 1 and number\n{}", diff_2);
        println!("difference of number and image 1\n{}", diff_3);
        println!("product of images\n{}", product_1);
        println!("product of number and image 1\n{}", product_2);
        println!("inverted image 1\n{}", -&img1);
        println!("fill coefficient of image 1\n{}\n", img1.fill_coefficient());
    }

    let rect = match &args.rect {
        Some(values) => rect_from_values(values)?,
        None => prompt_rect()?,
    };

    log::info!(
        "drawing ({}, {})-({}, {}) with {} on {}x{} canvas",
        rect.x1,
        rect.y1,
        rect.x2,
        rect.y2,
        rect.fill,
        args.canvas,
        args.canvas
    );
    let mut canvas: Grayscale<i16> = Grayscale::zeros(args.canvas, args.canvas);
    draw_rectangle(&mut canvas, rect.x1, rect.y1, rect.x2, rect.y2, rect.fill);

    if args.json {
        let summary = Summary {
            width: args.width,
            height: args.height,
            scalar,
            fill_coefficient_1: img1.fill_coefficient(),
            fill_coefficient_2: img2.fill_coefficient(),
            product_fill_coefficient: product_1.fill_coefficient(),
            images_equal: img1 == img2,
            canvas: canvas.to_lines(),
        };
        let json = serde_json::to_string_pretty(&summary).context("serialize summary")?;
        println!("{}", json);
    } else {
        print!("{}", canvas);
    }

    Ok(())
}

fn rect_from_values(values: &[i64]) -> Result<Rect> {
    let coord = |i: usize, name: &str| -> Result<usize> {
        usize::try_from(values[i]).with_context(|| format!("{} must be non-negative", name))
    };
    Ok(Rect {
        x1: coord(0, "x1")?,
        y1: coord(1, "y1")?,
        x2: coord(2, "x2")?,
        y2: coord(3, "y2")?,
        fill: i16::try_from(values[4]).context("fill does not fit in i16")?,
    })
}

fn prompt_rect() -> Result<Rect> {
    let stdin = io::stdin();
    let mut tokens = Tokens {
        lines: stdin.lock(),
        pending: Vec::new(),
    };

    prompt("enter top left point ")?;
    let x1 = tokens.next_parsed("x1")?;
    let y1 = tokens.next_parsed("y1")?;

    prompt("enter bottom right point ")?;
    let x2 = tokens.next_parsed("x2")?;
    let y2 = tokens.next_parsed("y2")?;

    prompt("enter number for filling ")?;
    let fill = tokens.next_parsed("fill")?;

    Ok(Rect { x1, y1, x2, y2, fill })
}

fn prompt(text: &str) -> Result<()> {
    let mut out = io::stdout();
    write!(out, "\n{}", text)?;
    out.flush().context("flush prompt")
}

/// Whitespace-separated tokens read lazily from a line source.
struct Tokens<R> {
    lines: R,
    pending: Vec<String>,
}

impl<R: BufRead> Tokens<R> {
    fn next_parsed<T>(&mut self, name: &str) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.lines.read_line(&mut line)? == 0 {
                anyhow::bail!("unexpected end of input reading {}", name);
            }
            self.pending = line.split_whitespace().rev().map(String::from).collect();
        }
        let token = self.pending.pop().unwrap_or_default();
        token
            .parse()
            .with_context(|| format!("invalid {}: {:?}", name, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satgray_math::GrayscaleError;

    #[test]
    fn test_tokens_span_lines() {
        let input = b"1 2\n\n 3\n4 -5\n" as &[u8];
        let mut tokens = Tokens {
            lines: input,
            pending: Vec::new(),
        };
        let a: usize = tokens.next_parsed("a").unwrap();
        let b: usize = tokens.next_parsed("b").unwrap();
        let c: usize = tokens.next_parsed("c").unwrap();
        let d: usize = tokens.next_parsed("d").unwrap();
        let e: i16 = tokens.next_parsed("e").unwrap();
        assert_eq!((a, b, c, d, e), (1, 2, 3, 4, -5));
        assert!(tokens.next_parsed::<usize>("f").is_err());
    }

    #[test]
    fn test_rect_from_values() {
        let rect = rect_from_values(&[1, 2, 3, 4, 9]).unwrap();
        assert_eq!((rect.x1, rect.y1, rect.x2, rect.y2, rect.fill), (1, 2, 3, 4, 9));
        assert!(rect_from_values(&[-1, 0, 0, 0, 0]).is_err());
        assert!(rect_from_values(&[0, 0, 0, 0, 40_000]).is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "grayscale_demo",
            "--seed",
            "7",
            "--rect",
            "1",
            "1",
            "3",
            "3",
            "9",
        ]);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.rect, Some(vec![1, 1, 3, 3, 9]));
        assert_eq!(args.canvas, 10);
    }

    #[test]
    fn test_multiply_error_is_reported() {
        let a: Grayscale<i16> = Grayscale::zeros(2, 2);
        let b: Grayscale<i16> = Grayscale::zeros(3, 3);
        let err: anyhow::Error = a.multiply(&b).unwrap_err().into();
        assert!(err.downcast_ref::<GrayscaleError>().is_some());
        assert_eq!(report(&err), "sizes don't match: 2x2 vs 3x3");
    }

    #[test]
    fn test_input_errors_are_reported() {
        let mut tokens = Tokens {
            lines: b"7 abc\n" as &[u8],
            pending: Vec::new(),
        };
        let _: usize = tokens.next_parsed("x1").unwrap();
        let err = tokens.next_parsed::<usize>("y1").unwrap_err();
        assert!(report(&err).starts_with("invalid y1: \"abc\": "));

        let err = tokens.next_parsed::<usize>("x2").unwrap_err();
        assert_eq!(report(&err), "unexpected end of input reading x2");
    }
}
