//! llb3d compiler CLI

use llbc::commands::{parse_symbols_options, symbols_file};

fn main() {
    llbc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "symbols" => {
            if args.len() < 3 {
                eprintln!("Usage: llb symbols <file.bb> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --stats              Print table statistics");
                eprintln!("  --chunk-size=<bytes> String arena chunk size (default: 20000)");
                std::process::exit(1);
            }

            let options = match parse_symbols_options(&args[3..]) {
                Ok(options) => options,
                Err(arg) => {
                    eprintln!("error: unrecognized option '{arg}'");
                    std::process::exit(1);
                }
            };
            symbols_file(&args[2], &options);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("llb3d compiler {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("llb3d compiler");
    println!();
    println!("Usage: llb <command> [options]");
    println!();
    println!("Commands:");
    println!("  symbols <file.bb>    List the identifiers a source file uses");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Symbols options:");
    println!("  --stats              Print symbol, node, collision and chunk counts");
    println!("  --chunk-size=<bytes> String arena chunk size (default: 20000)");
    println!();
    println!("Logging:");
    println!("  RUST_LOG=llb_symtab=debug llb symbols game.bb");
    println!();
    println!("Examples:");
    println!("  llb symbols game.bb");
    println!("  llb symbols game.bb --stats");
}
