
extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate regex;
extern crate term_grid;

pub mod assembler;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    if args.is_present("interactive") {
        run_interactive();
        return;
    }

    let ifile = args.value_of("INPUT").unwrap();
    let ipath = Path::new(ifile);

    // Open the path in read-only mode, returns `io::Result<File>`
    let ifile = match File::open(&ipath) {
        Err(err) => {
            error!("fatal: unable to open input file `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(file) => file,
    };

    let assembly = match assembler::assemble(Box::new(ifile)) {
        Err(err) => {
            error!("fatal: {}", err);
            std::process::exit(1);
        },
        Ok(assembly) => assembly,
    };

    if args.is_present("print-debug") {
        print_label_addresses(&assembly);
    }

    let image = assembly.image();
    println!("{}", image);

    if let Some(filename) = args.value_of("output") {
        let opath = Path::new(filename);
        let mut ofile = match File::create(&opath) {
            Err(err) => {
                error!("fatal: unable to open output file `{}`: {}", opath.display(), err);
                std::process::exit(1);
            },
            Ok(file) => file,
        };

        if let Err(err) = ofile.write_all(image.as_bytes()) {
            error!("fatal: unable to write to output file `{}`: {}", opath.display(), err);
            std::process::exit(1);
        }
    }

    if assembly.error_count > 0 {
        warn!("{} instruction(s) failed to assemble and were skipped", assembly.error_count);
        std::process::exit(1);
    }
}

/// Prints the symbol table built by pass 1 as a label/address grid.
fn print_label_addresses(assembly: &assembler::Assembly) {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    let mut bindings: Vec<(&str, usize)> = assembly.symbols.iter().collect();
    bindings.sort_by_key(|&(_, addr)| addr);

    println!("Label Addresses:");
    for (label, addr) in bindings {
        grid.add(Cell::from(format!("{}:", label)));
        grid.add(Cell::from(format!("{}", addr)));
    }
    println!("{}", grid.fit_into_columns(2));
}

/// The interactive single-instruction prompt: encodes one bare line (no
/// label support) and shows the full binary word, the per-field segment
/// breakdown, and the hex rendering.
fn run_interactive() {
    print!("Enter an instruction (e.g., pcset x1, 7): ");
    io::stdout().flush().ok();

    let mut line = String::new();
    if let Err(err) = io::stdin().read_line(&mut line) {
        error!("fatal: unable to read from stdin: {}", err);
        std::process::exit(1);
    }

    match assembler::encode_single(line.trim()) {
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        },
        Ok((word, segments)) => {
            println!("Complete Binary (24 bits): {}", word.to_binary());
            println!("Segmented Binary:");
            let mut grid = Grid::new(GridOptions {
                filling:     Filling::Spaces(1),
                direction:   Direction::LeftToRight,
            });
            for segment in segments {
                grid.add(Cell::from(format!("{}:", segment.name)));
                grid.add(Cell::from(segment.bits));
            }
            println!("{}", grid.fit_into_columns(2));
            println!("Hexadecimal: {}", word);
        },
    }
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap())
        .version(option_env!("CARGO_PKG_VERSION").unwrap())
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap())
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .required_unless("interactive")
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("write the hex image to an outfile"))
        .arg(Arg::with_name("interactive")
            .short("i")
            .long("interactive")
            .takes_value(false)
            .help("encode a single instruction from stdin and show its bit segments"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .alias("show")
            .alias("s")
            .takes_value(false)
            .help("prints the resolved label addresses alongside the assembly to STDOUT"))
        .get_matches()
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(match verbosity {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            3 | _ => log::LevelFilter::Debug,
        })
        // Diagnostics go to stderr so the hex image on stdout stays clean.
        .chain(std::io::stderr())
        .apply().ok();
}
