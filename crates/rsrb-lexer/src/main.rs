use rsrb_lexer::{logical_lines, tokenize};
use std::env;
use std::fs;
use std::io::{self, Read};

fn main() {
    let args: Vec<String> = env::args().collect();

    let input = if args.len() > 1 {
        // Read from file
        let filename = &args[1];
        fs::read_to_string(filename).unwrap_or_else(|e| {
            eprintln!("Error reading file '{}': {}", filename, e);
            std::process::exit(1);
        })
    } else {
        // Read from stdin
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).unwrap_or_else(|e| {
            eprintln!("Error reading stdin: {}", e);
            std::process::exit(1);
        });
        buffer
    };

    for line in logical_lines(&input) {
        println!("{:>4}  {}", line.number, line.text);
        match tokenize(&line.text) {
            Ok(tokens) => {
                let shown: Vec<String> = tokens
                    .iter()
                    .filter(|t| !t.is_space())
                    .map(|t| format!("{:?}", t))
                    .collect();
                println!("      {}", shown.join(" "));
            }
            Err(e) => println!("      <{}>", e),
        }
    }
}
