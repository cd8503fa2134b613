use clap::Parser;
use std::{fs, process};

use hackasm::{error::Error, msg, Assembly, Mode};

#[derive(Parser, Debug)]
#[clap(
    name = "Hack Assembler",
    version,
    about = "Assembler for the Hack 16-bit architecture"
)]
struct AppArgs {
    /// Input assembly file
    input: String,

    /// Output file, one binary word per line
    #[clap(short = 'o', long = "output", default_value = "out.hack")]
    output: String,

    /// Print the per-line listing after assembly
    #[clap(short, long)]
    dump: bool,

    /// Zero-fill unknown mnemonics instead of rejecting them
    #[clap(long)]
    lenient: bool,
}

fn main() {
    let args = AppArgs::parse();
    let mode = if args.lenient {
        Mode::Lenient
    } else {
        Mode::Strict
    };

    println!("1. Scan and Collect Labels");
    println!("  < {}", args.input);
    let source = match fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(err) => {
            msg::fail(&Error::FileRead(args.input.clone(), err).to_string());
            process::exit(1);
        }
    };
    let mut assembly = Assembly::scan(&source);

    println!("2. Resolve Symbols and Generate Binary");
    let words = match assembly.encode(mode) {
        Ok(words) => words,
        Err(err) => {
            match err.index().and_then(|index| assembly.line_of(index)) {
                Some(line) => msg::diag(&err.to_string(), &args.input, line.no(), line.raw()),
                None => msg::fail(&err.to_string()),
            }
            process::exit(1);
        }
    };

    // The output file is only created once every instruction has encoded.
    println!("  > {} ({} words)", args.output, words.len());
    let mut out = String::with_capacity(words.len() * 17);
    for word in &words {
        out.push_str(word);
        out.push('\n');
    }
    if let Err(err) = fs::write(&args.output, &out) {
        msg::fail(&Error::FileWrite(args.output.clone(), err).to_string());
        process::exit(1);
    }

    if args.dump {
        for (line, stmt) in assembly.lines() {
            match stmt {
                Some(stmt) => println!("{:>4} | {}", line.no(), stmt.cformat()),
                None => println!("{:>4} |", line.no()),
            }
        }
    }
}
