// src/cli.rs
use std::{env, fs, path::PathBuf};

use crate::mine::mine_page;
use crate::template::Template;

const MARKER: &str = "{{ HOLE }}";

pub enum Command {
    /// Strip boilerplate from a subject page given reference pages.
    Mine {
        subject: PathBuf,
        references: Vec<PathBuf>,
        out: Option<PathBuf>,
    },
    /// Learn sample texts into a brain file (created if missing).
    Learn { brain: PathBuf, samples: Vec<PathBuf> },
    /// Run a learned brain against a text file and print the captures.
    Extract { brain: PathBuf, input: PathBuf },
    /// Print a brain's literal text with hole markers.
    Show { brain: PathBuf },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let command = parse_args(&args)?;
    dispatch(command)
}

fn parse_args(args: &[String]) -> Result<Command, Box<dyn std::error::Error>> {
    let mut it = args.iter();
    let verb = it.next().map(String::as_str).unwrap_or("-h");
    match verb {
        "mine" => {
            let mut subject = None;
            let mut references = Vec::new();
            let mut out = None;
            while let Some(a) = it.next() {
                match a.as_str() {
                    "-o" | "--out" => {
                        out = Some(PathBuf::from(it.next().ok_or("Missing output path")?));
                    }
                    path if subject.is_none() => subject = Some(PathBuf::from(path)),
                    path => references.push(PathBuf::from(path)),
                }
            }
            let subject = subject.ok_or("Missing subject page")?;
            if references.is_empty() {
                return Err("Need at least one reference page".into());
            }
            Ok(Command::Mine { subject, references, out })
        }
        "learn" => {
            let brain = PathBuf::from(it.next().ok_or("Missing brain file")?);
            let samples: Vec<PathBuf> = it.map(PathBuf::from).collect();
            if samples.is_empty() {
                return Err("Need at least one sample".into());
            }
            Ok(Command::Learn { brain, samples })
        }
        "extract" => {
            let brain = PathBuf::from(it.next().ok_or("Missing brain file")?);
            let input = PathBuf::from(it.next().ok_or("Missing input file")?);
            Ok(Command::Extract { brain, input })
        }
        "show" => {
            let brain = PathBuf::from(it.next().ok_or("Missing brain file")?);
            Ok(Command::Show { brain })
        }
        "-h" | "--help" => {
            eprintln!(include_str!("cli_help.txt"));
            std::process::exit(0);
        }
        other => Err(format!("Unknown command: {}", other).into()),
    }
}

fn dispatch(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Mine { subject, references, out } => {
            let subject_html = fs::read_to_string(&subject)?;
            let mut reference_html = Vec::with_capacity(references.len());
            for path in &references {
                reference_html.push(fs::read_to_string(path)?);
            }
            let refs: Vec<&str> = reference_html.iter().map(String::as_str).collect();
            let fragments = mine_page(&subject_html, &refs);
            logf!(
                "mine: {} fragments from {} against {} references",
                fragments.len(),
                subject.display(),
                refs.len()
            );
            let text = fragments.join("\n");
            match out {
                Some(path) => fs::write(path, text + "\n")?,
                None => println!("{}", text),
            }
            Ok(())
        }
        Command::Learn { brain, samples } => {
            let mut template = match fs::read_to_string(&brain) {
                Ok(blob) => Template::from_serialized(&blob)?,
                Err(_) => Template::new(),
            };
            for path in &samples {
                template.learn(&fs::read_to_string(path)?);
            }
            let blob = template
                .brain()
                .map(|b| b.serialize())
                .transpose()?
                .unwrap_or_default();
            fs::write(&brain, blob)?;
            logf!(
                "learn: {} samples into {}, {} holes",
                samples.len(),
                brain.display(),
                template.num_holes()
            );
            println!("{} holes", template.num_holes());
            Ok(())
        }
        Command::Extract { brain, input } => {
            let template = Template::from_serialized(&fs::read_to_string(&brain)?)?;
            let text = fs::read_to_string(&input)?;
            match template.extract(&text) {
                Ok(captures) => {
                    for capture in captures {
                        println!("{}", capture);
                    }
                    Ok(())
                }
                Err(e) => {
                    loge!("extract: {} did not match {}", brain.display(), input.display());
                    Err(e.into())
                }
            }
        }
        Command::Show { brain } => {
            let template = Template::from_serialized(&fs::read_to_string(&brain)?)?;
            println!("{}", template.as_text(MARKER));
            Ok(())
        }
    }
}
