use clap::Parser;
use crossterm::style::Stylize;
use dict_core::{Dictionary, LogLevel, LogSink, WordEntry};
use std::io::{self, stdin, stdout, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Interactive word-frequency dictionary shell.
#[derive(Parser, Debug)]
#[command(name = "dict_shell", version)]
struct Config {
    /// File the log is appended to
    #[arg(long, default_value = "dictionary_app.log")]
    log_file: PathBuf,

    /// Minimum level written to the log (debug, info, warning, error)
    #[arg(long, default_value = "info")]
    log_level: LogLevel,

    /// Dictionary file loaded (replacing) at startup
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Print sorted views as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, PartialEq)]
enum Command {
    Ingest(PathBuf),
    Add(Vec<String>),
    Save(PathBuf),
    Load(PathBuf),
    Merge(PathBuf),
    Snapshot(PathBuf),
    Restore(PathBuf),
    Clear,
    Alpha,
    Freq,
    Size,
    Level(LogLevel),
    Help,
    Exit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let name = parts.next().unwrap_or("");
    let rest: Vec<&str> = parts.collect();
    let path_arg = || -> Result<PathBuf, String> {
        match rest.as_slice() {
            [path] => Ok(PathBuf::from(path)),
            _ => Err(format!("'{}' expects exactly one path", name)),
        }
    };

    match name {
        "ingest" => path_arg().map(Command::Ingest),
        "add" if !rest.is_empty() => Ok(Command::Add(rest.iter().map(|s| s.to_string()).collect())),
        "add" => Err("'add' expects at least one word".to_string()),
        "save" => path_arg().map(Command::Save),
        "load" => path_arg().map(Command::Load),
        "merge" => path_arg().map(Command::Merge),
        "snapshot" => path_arg().map(Command::Snapshot),
        "restore" => path_arg().map(Command::Restore),
        "clear" => Ok(Command::Clear),
        "alpha" => Ok(Command::Alpha),
        "freq" => Ok(Command::Freq),
        "size" => Ok(Command::Size),
        "level" => match rest.as_slice() {
            [level] => level.parse().map(Command::Level).map_err(|e| format!("{}", e)),
            _ => Err("'level' expects one of debug, info, warning, error".to_string()),
        },
        "help" | "" => Ok(Command::Help),
        "exit" | "quit" => Ok(Command::Exit),
        other => Err(format!("unknown command '{}', type 'help'", other)),
    }
}

fn main() -> io::Result<()> {
    let config = Config::parse();

    let log = Arc::new(LogSink::new());
    if let Err(e) = log.init(&config.log_file) {
        eprintln!("[WARN] {}. Continuing without a log file.", e);
    }
    log.set_level(config.log_level);

    let mut dictionary = Dictionary::with_log(Arc::clone(&log));
    if let Some(path) = &config.dictionary {
        match dictionary.load_from_file(path) {
            Ok(n) => println!("Loaded {} words from '{}'", n, path.display()),
            Err(e) => eprintln!("{} {}", "[ERROR]".red(), e),
        }
    }

    println!("{}", "Word Frequency Dictionary. Type 'help' for commands.".bold());
    let mut out = stdout();
    loop {
        print!("[{} words]> ", dictionary.size());
        out.flush()?;

        let mut input = String::new();
        if stdin().lock().read_line(&mut input)? == 0 {
            break;
        }

        let command = match parse_command(input.trim()) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{} {}", "[ERROR]".red(), message);
                continue;
            }
        };
        if command == Command::Exit {
            break;
        }
        run(&mut dictionary, &log, command, config.json);
    }

    log.info("Application closing");
    drop(dictionary);
    log.close();
    Ok(())
}

fn run(dictionary: &mut Dictionary, log: &LogSink, command: Command, json: bool) {
    let outcome = match command {
        Command::Ingest(path) => dictionary
            .add_words_from_file(&path)
            .map(|n| format!("Processed {} tokens from '{}'", n, path.display())),
        Command::Add(words) => {
            for word in &words {
                dictionary.add_word(word);
            }
            Ok(format!("Added {} tokens", words.len()))
        }
        Command::Save(path) if dictionary.is_empty() => {
            log.warning("Attempt to save an empty dictionary");
            Ok(format!("Dictionary is empty, nothing saved to '{}'", path.display()))
        }
        Command::Save(path) => dictionary
            .save_to_file(&path)
            .map(|n| format!("Saved {} words to '{}'", n, path.display())),
        Command::Load(path) => dictionary
            .load_from_file(&path)
            .map(|n| format!("Loaded {} words from '{}'", n, path.display())),
        Command::Merge(path) => dictionary
            .merge_from_file(&path)
            .map(|n| format!("Merged {} words from '{}'", n, path.display())),
        Command::Snapshot(path) => dictionary
            .save_snapshot(&path)
            .map(|_| format!("Snapshot written to '{}'", path.display())),
        Command::Restore(path) => dictionary
            .load_snapshot(&path)
            .map(|n| format!("Restored {} words from '{}'", n, path.display())),
        Command::Clear => {
            dictionary.clear();
            Ok("Dictionary cleared".to_string())
        }
        Command::Alpha => {
            print_words(&dictionary.words_alphabetically(), json);
            return;
        }
        Command::Freq => {
            print_words(&dictionary.words_by_frequency(), json);
            return;
        }
        Command::Size => Ok(format!(
            "{} distinct words, {} occurrences",
            dictionary.size(),
            dictionary.total_occurrences()
        )),
        Command::Level(level) => {
            log.set_level(level);
            Ok(format!("Log level set to {}", level))
        }
        Command::Help => {
            print_help();
            return;
        }
        Command::Exit => return,
    };

    match outcome {
        Ok(message) => println!("{}", message.green()),
        Err(e) => eprintln!("{} {}", "[ERROR]".red(), e),
    }
}

fn print_words(words: &[WordEntry], json: bool) {
    if json {
        match serde_json::to_string_pretty(words) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("{} {}", "[ERROR]".red(), e),
        }
        return;
    }
    if words.is_empty() {
        println!("Dictionary is empty.");
        return;
    }

    let width = words.iter().map(|e| e.word.len()).max().unwrap_or(4).max(4);
    println!("{}", format!("{:<width$}  {:>8}", "Word", "Count", width = width).bold());
    for entry in words {
        println!("{:<width$}  {:>8}", entry.word, entry.count, width = width);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  ingest <file>     add every word of a text file");
    println!("  add <word>...     add words typed on the line");
    println!("  save <file>       save the dictionary");
    println!("  load <file>       replace the dictionary with a saved one");
    println!("  merge <file>      add a saved dictionary's counts to this one");
    println!("  snapshot <file>   write a binary snapshot");
    println!("  restore <file>    replace the dictionary with a binary snapshot");
    println!("  clear             remove every word");
    println!("  alpha | freq      list words alphabetically or by frequency");
    println!("  size              show the number of words");
    println!("  level <level>     change the log level");
    println!("  exit              quit");
}
