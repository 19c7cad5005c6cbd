use std::{fs, io::Read};

use first_follow::{analyze, Grammar};

fn print_help() {
    println!("Usage: first-follow outputs [options] [grammar file]");
    println!("outputs:");
    println!("  prod: Productions");
    println!("  first: FIRST sets");
    println!("  follow: FOLLOW sets");
    println!("  sets: FIRST sets, then FOLLOW sets");
    println!("  ff: Nullable, first and follow table");
    println!("options:");
    println!("  -h: Print this help");
    println!("  -l: Print in LaTeX format");
    println!("  -j: Print in JSON format");
    println!("  -e: Use the built-in expression grammar");
    println!("Set RUST_LOG=debug to trace the fixed-point passes.");
}

enum OutputFormat {
    Plain,
    LaTeX,
    JSON,
}

fn run(args: &[String]) -> Result<(), String> {
    let mut outputs: Vec<&str> = Vec::new();
    let mut i: usize = 0;
    while i < args.len() && ["prod", "first", "follow", "sets", "ff"].contains(&args[i].as_str())
    {
        outputs.push(args[i].as_str());
        i += 1;
    }

    let mut output_format = OutputFormat::Plain;
    let mut builtin = false;

    while i < args.len() && ["-h", "--help", "-l", "-j", "-e"].contains(&args[i].as_str()) {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            "-l" => output_format = OutputFormat::LaTeX,
            "-j" => output_format = OutputFormat::JSON,
            _ => builtin = true,
        }
        i += 1;
    }

    if i + 1 < args.len() || outputs.is_empty() || (builtin && i < args.len()) {
        print_help();
        return Ok(());
    }

    let g = if builtin {
        Grammar::expression().map_err(|e| e.to_string())?
    } else {
        let input = if i == args.len() {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|e| format!("Error reading stdin: {}", e))?;
            input
        } else {
            fs::read_to_string(args[i].as_str())
                .map_err(|e| format!("Error reading input file: {}", e))?
        };
        Grammar::parse(&input).map_err(|e| e.to_string())?
    };

    // Nothing is printed unless both engines succeed.
    let analysis = analyze(&g).map_err(|e| e.to_string())?;
    let t = g.to_non_terminal_output_vec(&analysis);

    for output in outputs {
        let text = match (output, &output_format) {
            ("prod", OutputFormat::JSON) => {
                serde_json::to_string(&g.to_production_output_vec()).map_err(|e| e.to_string())?
            }
            ("prod", OutputFormat::LaTeX) => g.to_production_output_vec().to_latex(),
            ("prod", _) => g.to_production_output_vec().to_plaintext(),
            (_, OutputFormat::JSON) => t.to_json().map_err(|e| e.to_string())?,
            (_, OutputFormat::LaTeX) => t.to_latex(),
            ("first", OutputFormat::Plain) => t.to_first_plaintext(),
            ("follow", OutputFormat::Plain) => t.to_follow_plaintext(),
            ("sets", OutputFormat::Plain) => t.to_sets_plaintext(),
            _ => t.to_plaintext(),
        };
        println!("{}", text);
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args = std::env::args().skip(1).collect::<Vec<String>>();
    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
