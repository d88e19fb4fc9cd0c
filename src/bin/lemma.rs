//! Command-line front end for the in-repo arithmetic grammar.
//!
//! Reads an expression from a file (or stdin with `-`), parses it, and
//! prints the tree in the requested format. Mostly useful for eyeballing
//! parse trees while working on a grammar:
//!
//!   lemma input.txt --format dot | dot -Tpng -o tree.png

use std::io::Read;

use clap::{Arg, Command};

fn main() {
    let matches = Command::new("lemma")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse arithmetic expressions and print the parse tree")
        .arg(
            Arg::new("input")
                .help("Input file, or '-' for stdin")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: repr, dot, or json")
                .default_value("repr"),
        )
        .get_matches();

    let input_arg = matches
        .get_one::<String>("input")
        .expect("input is required");
    let format = matches.get_one::<String>("format").expect("has default");

    let source = read_input(input_arg);

    let tree = lemma::calc::parse(&source).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });

    match format.as_str() {
        "repr" => print_repr(&tree, 0),
        "dot" => print!("{}", lemma::dotify(&tree)),
        "json" => {
            let json = serde_json::to_string_pretty(&tree).unwrap_or_else(|e| {
                eprintln!("Error serializing tree: {}", e);
                std::process::exit(1);
            });
            println!("{}", json);
        }
        other => {
            eprintln!("Unknown format: {}", other);
            std::process::exit(1);
        }
    }
}

fn read_input(path: &str) -> String {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).unwrap_or_else(|e| {
            eprintln!("Error reading stdin: {}", e);
            std::process::exit(1);
        });
        buf
    } else {
        std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading {}: {}", path, e);
            std::process::exit(1);
        })
    }
}

/// One line per node, indented by depth.
fn print_repr(node: &lemma::ParseNode, depth: usize) {
    println!("{}{}", "  ".repeat(depth), node);
    for child in node {
        print_repr(child, depth + 1);
    }
}
