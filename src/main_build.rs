// Copyright (C) 2020-2026 Andy Kurnia.

use tileplay::{alphabet, build, error};

// one word per line, blank lines skipped, case-insensitive.
fn read_machine_words(
    alphabet: &alphabet::Alphabet,
    giant_string: &str,
) -> error::Returns<Box<[Box<[u8]>]>> {
    let mut machine_words = Vec::<Box<[u8]>>::new();
    for (line_num, s) in (1..).zip(giant_string.lines()) {
        let s = s.trim();
        if s.is_empty() {
            continue;
        }
        match alphabet.read_word(s) {
            Ok(v) => machine_words.push(v.into_boxed_slice()),
            Err(e) => {
                tileplay::return_error!(format!("line {line_num}: {e}"));
            }
        }
    }
    machine_words.sort_unstable();
    machine_words.dedup();
    Ok(machine_words.into_boxed_slice())
}

fn usage(program: &str) -> error::Returns<()> {
    tileplay::return_error!(format!(
        "usage: {program} english-kwg|english-kwg-dawg <words.txt> <out.kwg>"
    ));
}

pub fn main() -> error::Returns<()> {
    let args = std::env::args().collect::<Vec<_>>();
    let program = args.first().map(String::as_str).unwrap_or("buildlex");
    if args.len() != 4 {
        return usage(program);
    }
    let build_format = match args[1].as_str() {
        "english-kwg" => build::BuildFormat::Gaddawg,
        "english-kwg-dawg" => build::BuildFormat::DawgOnly,
        _ => return usage(program),
    };
    let t0 = std::time::Instant::now();
    let machine_words = read_machine_words(
        &alphabet::make_english_alphabet(),
        &std::fs::read_to_string(&args[2])?,
    )?;
    std::fs::write(&args[3], build::build(build_format, &machine_words)?)?;
    println!(
        "{} words into {} in {:?}",
        machine_words.len(),
        args[3],
        t0.elapsed()
    );
    Ok(())
}
