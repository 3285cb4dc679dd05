use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use sudoku_scan::core::init_from_env;
use sudoku_scan::{
    io::{load_params, ScanReport},
    Board, FrameSource, NullRecognizer, ScanParams, StillImageSource, SudokuScanner,
};

/// Locate, solve and reproject a Sudoku puzzle from a photograph.
#[derive(Parser, Debug)]
#[command(name = "sudoku-scan", version, about)]
struct Args {
    /// Input image (still-image mode).
    image: Option<PathBuf>,

    /// Solve a 9-line text board instead of scanning an image
    /// (digits 1-9, `0` or `.` for empty).
    #[arg(long, conflicts_with = "image")]
    board: Option<PathBuf>,

    /// Scan parameter overrides, JSON.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Minimum OCR confidence (0-100) to accept a digit.
    #[arg(long)]
    min_confidence: Option<f32>,

    /// Write a JSON scan report here.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Save the rectified puzzle view here (PNG).
    #[arg(long)]
    rectified: Option<PathBuf>,
}

fn main() -> ExitCode {
    let _ = init_from_env();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if let Some(board_path) = &args.board {
        return solve_board_file(board_path);
    }

    let Some(image_path) = &args.image else {
        return Err("an image path (or --board) is required".into());
    };

    let mut params = match &args.params {
        Some(path) => load_params(path)?,
        None => ScanParams::default(),
    };
    if let Some(gate) = args.min_confidence {
        params.min_confidence = gate;
    }

    let mut source = StillImageSource::new(image_path);
    let Some(frame) = source.next_frame()? else {
        return Err("image source yielded no frame".into());
    };
    info!(
        "loaded {} ({}x{})",
        image_path.display(),
        frame.width,
        frame.height
    );

    let mut report = ScanReport::new(
        image_path.display().to_string(),
        frame.width,
        frame.height,
    );

    let scanner = SudokuScanner::new(params);
    // a real OCR engine plugs in through the DigitRecognizer trait; without
    // one, every cell stays empty and the solver fills the board freely
    let mut engine = NullRecognizer;

    match scanner.scan(&frame.view(), &mut engine)? {
        Some(scan) => {
            match &scan.solution {
                Some(solution) => {
                    println!("SOLVE:");
                    print!("{solution}");
                }
                None => println!("COULDN'T FIND ANY SOLUTION :("),
            }
            report.set_scan(&scan);

            if let Some(path) = &args.rectified {
                save_gray(&scan.rectified, path)?;
                info!("rectified view written to {}", path.display());
            }
        }
        None => println!("no puzzle detected"),
    }

    if let Some(path) = &args.report {
        report.write_json(path)?;
        info!("report written to {}", path.display());
    }

    Ok(())
}

fn solve_board_file(path: &PathBuf) -> Result<(), Box<dyn Error>> {
    let text = std::fs::read_to_string(path)?;
    let mut board = Board::parse(&text)?;
    if sudoku_scan::solve(&mut board) {
        println!("SOLVE:");
        print!("{board}");
    } else {
        println!("COULDN'T FIND ANY SOLUTION :(");
    }
    Ok(())
}

fn save_gray(img: &sudoku_scan::core::GrayImage, path: &PathBuf) -> Result<(), Box<dyn Error>> {
    let buffer = image::GrayImage::from_raw(img.width as u32, img.height as u32, img.data.clone())
        .ok_or("rectified image buffer has inconsistent dimensions")?;
    buffer.save(path)?;
    Ok(())
}
