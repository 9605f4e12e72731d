//! weft command-line driver.

use weftc::commands::{self, CommandError, Report};
use weftc::options::{parse_options, Options};

fn main() {
    weftc::init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = args[1].as_str();
    match command {
        "lex" | "tree" | "eval" => {
            let options = match parse_options(&args[2..]) {
                Ok(options) => options,
                Err(e) => {
                    eprintln!("error: {e}");
                    eprintln!("Run `weft help` for usage.");
                    std::process::exit(2);
                }
            };
            match run(command, &options) {
                Ok(report) => {
                    print!("{}", report.output);
                    eprint!("{}", report.diagnostics);
                    if report.failed {
                        std::process::exit(1);
                    }
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("weft {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn run(command: &str, options: &Options) -> Result<Report, CommandError> {
    let source = commands::read_source(&options.input)?;
    match command {
        "lex" => commands::lex(options, &source),
        "tree" => commands::tree(options, &source),
        _ => commands::eval(options, &source),
    }
}

fn print_usage() {
    println!("weft expression language");
    println!();
    println!("Usage: weft <command> [options] [file | -e <expr> | -]");
    println!();
    println!("Commands:");
    println!("  lex        Lex and print the raw token forest");
    println!("  tree       Lex, group operators and print the forest");
    println!("  eval       Evaluate and print the value");
    println!("  help       Show this help message");
    println!("  version    Show version information");
    println!();
    println!("Options:");
    println!("  --grammar=<name>   Starting rule set (default, command line)");
    println!("  --set name=value   Evaluate value and bind it as name (eval only)");
    println!("  --partial          Leave unknown names unresolved (eval only)");
    println!("  -e <expr>          Read the source from the argument");
    println!();
    println!("Without a file or -e the source is read from standard input.");
    println!();
    println!("Environment:");
    println!("  RUST_LOG           Log filter (default: warn)");
    println!("  WEFT_LOG_TREE=1    Render logs as an indented span tree");
}
