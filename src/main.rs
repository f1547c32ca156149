//! lzwin CLI
//! Usage:
//!   lzwin table  <input_file> [window_size]
//!   lzwin verify <input_file> [window_size]
//!
//! `table` prints the per-token breakdown the way the codec accounts it;
//! `verify` round-trips the file through encode and decode.

use std::{env, fs, process};

use lzwin::{decode, encode, CodecResult, Token, DEFAULT_WINDOW_SIZE};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 || args.len() > 4 {
        eprintln!("Usage:");
        eprintln!("  lzwin table   <input> [window_size]");
        eprintln!("  lzwin verify  <input> [window_size]");
        process::exit(1);
    }

    let command = &args[1];
    let input_path = &args[2];
    let window_size = match args.get(3) {
        Some(raw) => raw.parse::<usize>().unwrap_or_else(|_| {
            eprintln!("Bad window size: {}", raw);
            process::exit(1);
        }),
        None => DEFAULT_WINDOW_SIZE,
    };

    let input = fs::read(input_path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", input_path, e);
        process::exit(1);
    });

    let packed = encode(&input, window_size).unwrap_or_else(|e| {
        eprintln!("Encode error: {}", e);
        process::exit(1);
    });

    match command.as_str() {
        "table" => {
            print_table(&packed);
            println!(
                "{} bytes in, {} bits out ({:.3} bits/symbol)",
                input.len(),
                packed.total_bits,
                if input.is_empty() {
                    0.0
                } else {
                    packed.total_bits as f64 / input.len() as f64
                }
            );
        }
        "verify" => {
            let output = decode(&packed.bytes, packed.total_bits, window_size).unwrap_or_else(|e| {
                eprintln!("Decode error: {}", e);
                process::exit(1);
            });
            if output == input {
                println!(
                    "Round-trip OK: {} bytes -> {} bits -> {} bytes (window {})",
                    input.len(),
                    packed.total_bits,
                    output.len(),
                    window_size
                );
            } else {
                eprintln!("Round-trip MISMATCH: {} bytes in, {} bytes out", input.len(), output.len());
                process::exit(1);
            }
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            process::exit(1);
        }
    }
}

fn print_table(packed: &CodecResult) {
    println!(
        "| {:>4} | {:>4} | {:<24} | {:>6} | {:>6} | {:<28} | {:>5} |",
        "step", "flag", "sequence", "offset", "length", "code", "bits"
    );
    println!("{}", "-".repeat(100));

    // Expand tokens as we print so the sequence column shows the symbols
    // each token actually covers.
    let mut output: Vec<u8> = Vec::new();
    for (step, token) in packed.tokens.iter().enumerate() {
        let (flag, sequence, offset, length) = match token.token {
            Token::Literal { symbol } => {
                output.push(symbol);
                (0, printable(&[symbol]), String::new(), String::new())
            }
            Token::Match { offset, length } => {
                let start = output.len() - offset as usize;
                for k in 0..length as usize {
                    let symbol = output[start + k];
                    output.push(symbol);
                }
                (
                    1,
                    printable(&output[output.len() - length as usize..]),
                    offset.to_string(),
                    length.to_string(),
                )
            }
        };
        println!(
            "| {:>4} | {:>4} | {:<24} | {:>6} | {:>6} | {:<28} | {:>5} |",
            step,
            flag,
            sequence,
            offset,
            length,
            token.code_string(),
            token.bit_cost()
        );
    }

    println!("{}", "-".repeat(100));
    println!("{:>92} {} bits", "total:", packed.total_bits);
}

/// Render a symbol run for the table, escaping anything non-printable.
fn printable(run: &[u8]) -> String {
    let mut s = String::with_capacity(run.len());
    for &b in run {
        if (0x20..0x7F).contains(&b) {
            s.push(b as char);
        } else {
            s.push_str(&format!("\\x{:02x}", b));
        }
    }
    if s.len() > 24 {
        s.truncate(21);
        s.push_str("...");
    }
    s
}
