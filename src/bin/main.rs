use std::time::Instant;

use clap::{arg, value_parser, ArgMatches, Command};
use lz11_squish::{compress_with, tokens, Options, SizeField, Token, MAX_MATCH_LEN};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn options(matches: &ArgMatches) -> Options {
    let size_field = match matches.get_one::<String>("size_field").map(|x| &**x) {
        Some("standard") => SizeField::Standard,
        _ => SizeField::Legacy,
    };
    let max_match = *matches
        .get_one::<usize>("max_match")
        .unwrap_or(&MAX_MATCH_LEN);
    Options::new()
        .with_size_field(size_field)
        .with_max_match_len(max_match)
}

fn init_logging(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn cli() -> Command {
    Command::new("lz11-squish")
        .arg(
            arg!(-s --size_field <LAYOUT> "How header byte 3 stores the length")
                .long("size-field")
                .default_value("legacy")
                .value_parser(["legacy", "standard"]),
        )
        .arg(
            arg!(-m --max_match <LEN> "Longest match to emit")
                .long("max-match")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--log_level <LEVEL> "Log level")
                .long("log-level")
                .default_value("info")
                .value_parser(["trace", "debug", "info", "warn", "error"]),
        )
        .subcommand(
            Command::new("compress")
                .alias("comp")
                .arg(arg!(<in> "input filename"))
                .arg(arg!(<out> "output (compressed) filename"))
                .arg(arg!(-b --batch "treat inputs as directories, compress every file in <in> to a file in <out>")),
        )
        .subcommand(
            Command::new("analyze")
                .arg(arg!(<in> "input filename")),
        )
        .subcommand(
            Command::new("bench-compress")
                .arg(arg!(<dir>))
                .arg(
                    arg!(-i --iters <iters>)
                        .default_value("1")
                        .value_parser(value_parser!(usize)),
                )
                .arg(arg!(-d --check_dir <dir>)),
        )
        .subcommand_required(true)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    let level = matches
        .get_one::<String>("log_level")
        .map(|x| &**x)
        .unwrap_or("info");
    init_logging(level)?;

    let opts = options(&matches);
    opts.validate()?;
    let compress_one = |inp: &[u8]| compress_with(inp, &opts);

    match matches.subcommand() {
        Some(("compress", matches)) => {
            let inp = matches.get_one::<String>("in").unwrap();
            let out = matches.get_one::<String>("out").unwrap();
            if matches.get_flag("batch") {
                for entry in std::fs::read_dir(inp)? {
                    let entry = entry?;
                    let indata = std::fs::read(entry.path())?;
                    let outdata = compress_one(&indata)?;
                    info!(
                        file = %entry.path().display(),
                        input_len = indata.len(),
                        output_len = outdata.len(),
                        "compressed"
                    );
                    let thingy = std::path::Path::new(out).join(entry.file_name());
                    std::fs::write(thingy, outdata)?;
                }
            } else {
                let inp_file = std::fs::read(inp)?;
                let outbuf = compress_one(&inp_file)?;
                info!(
                    input_len = inp_file.len(),
                    output_len = outbuf.len(),
                    "compressed"
                );
                std::fs::write(out, outbuf)?;
            }
        }
        Some(("analyze", matches)) => {
            let inp = std::fs::read(matches.get_one::<String>("in").unwrap())?;
            let (mut literals, mut matched, mut encoded) = (0usize, 0usize, 0usize);
            let mut count = 0usize;
            let mut it = tokens(&inp, &opts)?;
            for t in it.by_ref() {
                println!("{:?}", t);
                match t {
                    Token::Literal(_) => literals += 1,
                    Token::Match { len, .. } => matched += len,
                }
                encoded += t.encoded_len();
                count += 1;
            }
            let blocks = count.div_ceil(8);
            println!(
                "{} bytes in {} tokens: {} literals, {} bytes matched, {} blocks, {} bytes out",
                it.position(),
                count,
                literals,
                matched,
                blocks,
                lz11_squish::HEADER_LEN + blocks + encoded
            );
        }
        Some(("bench-compress", matches)) => {
            let iters = *matches.get_one::<usize>("iters").unwrap();
            let dir = matches.get_one::<String>("dir").unwrap();
            let checkd = matches.get_one::<String>("check_dir");
            let mut files = vec![];
            for entry in std::fs::read_dir(dir)? {
                files.push(entry?.path());
            }
            files.sort();
            for iter in 0..iters {
                if iter > 0 {
                    println!("--- iteration {} ---", iter + 1);
                }
                for f in &files {
                    let inp = std::fs::read(f)?;
                    let now = Instant::now();
                    let out = compress_one(&inp)?;
                    let duration = now.elapsed();
                    let fname = f.file_name().unwrap().to_string_lossy();
                    println!("File {} len = {}, took {:.2?}", fname, out.len(), duration);
                    if let Some(d) = checkd {
                        let thingy = std::path::Path::new(d).join(f.file_name().unwrap());
                        let expected_size = std::fs::metadata(thingy)?.len();
                        assert!(out.len() == expected_size as usize,
                            "unexpected compressed file size! expected {}", expected_size);
                    }
                }
            }
        }
        _ => unreachable!(),
    }
    Ok(())
}
