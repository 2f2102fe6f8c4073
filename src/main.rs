use anyhow::{Context, Result};
use clap::Parser;
use dbpf_grep::format::{label, tgi_text};
use dbpf_grep::{MatchPattern, ScanEvent, ScanOptions, Scanner, TgiRecord, TypeNameTable};
use log::{debug, info, warn};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const EXAMPLES: &str = "\
Examples:
    dbpf-grep file.dat                          # print the whole TGI index
    dbpf-grep -i --regexp '030.00\\b' file.dat   # print only matching TGIs
    dbpf-grep -e Exemplar -e FSH file.dat       # print TGIs of Exemplars and FSHs

If multiple files or a directory are passed, each line is prefixed with the
name of the file it came from.";

/// File extensions picked up when walking a directory.
const DBPF_EXTENSIONS: &[&str] = &["dat", "sc4model", "sc4desc", "sc4lot", "sc4", "package"];

/// Print the TGI index of DBPF files, optionally filtered by a pattern
#[derive(Parser, Debug)]
#[command(name = "dbpf-grep", version, about, after_help = EXAMPLES)]
struct Args {
    #[arg(short = 'e', long = "regexp", value_name = "pattern")]
    /// Print only matching TGIs (case-sensitive regular expression, repeatable)
    regexp: Vec<String>,
    #[arg(short, long)]
    /// Ignore case distinctions in patterns
    ignore_case: bool,
    #[arg(short = 'l', long)]
    /// Only print the names of matching files, no TGIs
    name_only: bool,
    #[arg(long)]
    /// Never colorize output
    no_color: bool,
    #[arg(required = true, value_name = "files")]
    /// DBPF files or directories to scan
    files: Vec<PathBuf>,
}

mod colors {
    pub const GRAY: &str = "\x1b[90m";
    pub const GREEN: &str = "\x1b[92m";
    pub const YELLOW: &str = "\x1b[93m";
    pub const BLUE: &str = "\x1b[94m";
    pub const PURPLE: &str = "\x1b[95m";
    pub const ENDC: &str = "\x1b[0m";
}

fn label_color(type_id: u32) -> Option<&'static str> {
    match type_id {
        0x7AB50E44 => Some(colors::GRAY),
        0x05342861 | 0x6534284A => Some(colors::GREEN),
        0x296678F7 => Some(colors::BLUE),
        0xCA63E2A3 | 0x00000000 | 0x0A5BCF4B | 0xEA5118B0 => Some(colors::YELLOW),
        _ => None,
    }
}

struct Printer<W: Write> {
    out: W,
    color: bool,
    table: &'static TypeNameTable,
}

impl<W: Write> Printer<W> {
    fn path(&mut self, path: &Path) -> io::Result<()> {
        if self.color {
            write!(self.out, "{}{}{}", colors::PURPLE, path.display(), colors::ENDC)
        } else {
            write!(self.out, "{}", path.display())
        }
    }

    fn line(&mut self, path: Option<&Path>, record: &TgiRecord, text: &str) -> io::Result<()> {
        if let Some(path) = path {
            self.path(path)?;
            write!(self.out, ":")?;
        }
        if !self.color {
            return writeln!(self.out, "{}", text);
        }

        let tgi = tgi_text(record).replace('-', &format!("{}-{}", colors::GRAY, colors::ENDC));
        match label(record, self.table) {
            Some(name) => match label_color(record.type_id) {
                Some(c) => writeln!(self.out, "{} ({}{}{})", tgi, c, name, colors::ENDC),
                None => writeln!(self.out, "{} ({})", tgi, name),
            },
            None => writeln!(self.out, "{}", tgi),
        }
    }

    fn file_name(&mut self, path: &Path) -> io::Result<()> {
        self.path(path)?;
        writeln!(self.out)
    }
}

fn is_dbpf_name(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| DBPF_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Expands directory arguments. Returns the files to scan, whether any
/// argument was a directory, and how many directory entries were unreadable.
fn collect_inputs(args: &[PathBuf]) -> (Vec<PathBuf>, bool, usize) {
    let mut files = Vec::new();
    let mut saw_dir = false;
    let mut walk_errors = 0;

    for arg in args {
        if !arg.is_dir() {
            files.push(arg.clone());
            continue;
        }
        saw_dir = true;
        for entry in WalkDir::new(arg).sort_by_file_name() {
            match entry {
                Ok(e) if e.file_type().is_file() && is_dbpf_name(e.path()) => files.push(e.into_path()),
                Ok(_) => {}
                Err(e) => {
                    eprintln!("dbpf-grep: {}", e);
                    walk_errors += 1;
                }
            }
        }
    }

    (files, saw_dir, walk_errors)
}

fn run(args: Args) -> Result<i32> {
    let pattern = MatchPattern::new(&args.regexp, args.ignore_case).context("Invalid pattern")?;

    let (files, saw_dir, walk_errors) = collect_inputs(&args.files);
    info!("Found {} files to scan.", files.len());
    if files.is_empty() {
        warn!("No DBPF files found in {} arguments.", args.files.len());
        eprintln!("dbpf-grep: no DBPF files found");
        return Ok(2);
    }

    let options = ScanOptions {
        names_only: args.name_only,
        with_filename: with_filename(&args.files, saw_dir),
    };
    let color = !args.no_color && std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout);
    debug!("Options: {:?}, color: {}", options, color);

    let table = TypeNameTable::standard();
    let stdout = io::stdout();
    let mut printer = Printer { out: BufWriter::new(stdout.lock()), color, table };
    let mut scanner = Scanner::new(files, pattern, table, options);

    while let Some(event) = scanner.next() {
        let written = match &event {
            ScanEvent::Line { path, record, text } => printer.line(path.as_deref(), record, text),
            ScanEvent::FileName(path) => printer.file_name(path),
            ScanEvent::Failed { path, error } => printer.out.flush().map(|_| {
                eprintln!("dbpf-grep: {}: {}", path.display(), error);
            }),
        };
        match written {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                debug!("Output closed, stopping scan.");
                return Ok(scanner.summary().exit_code());
            }
            other => other?,
        }
    }
    match printer.out.flush() {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e.into()),
        _ => {}
    }

    let summary = scanner.summary();
    info!(
        "Scanned {} files: {} matched, {} failed, {} lines.",
        summary.files_scanned, summary.files_matched, summary.files_failed, summary.lines_matched
    );
    if walk_errors > 0 {
        warn!("{} directory entries could not be read.", walk_errors);
    }
    Ok(exit_code(summary.exit_code(), walk_errors))
}

/// Lines carry their file name once more than one archive can be involved.
fn with_filename(args: &[PathBuf], saw_dir: bool) -> bool {
    args.len() > 1 || saw_dir
}

/// Unreadable directory entries count as failed inputs.
fn exit_code(scan_code: i32, walk_errors: usize) -> i32 {
    if walk_errors > 0 {
        2
    } else {
        scan_code
    }
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let code = match run(Args::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("dbpf-grep: {:#}", e);
            2
        }
    };
    std::process::exit(code);
}
