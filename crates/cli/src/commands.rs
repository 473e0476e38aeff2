use crate::{
  App,
  diagnostics::{CodeFrame, Message},
};

use anstream::{eprintln, println};
use bumpalo::Bump;
use jsfmt_formatter::{Config, FormatError, print_ast_to_doc};
use std::{
  fs,
  io::{IsTerminal, Read},
};

pub enum CommandStatus {
  /// Every file was handled and matched expectations
  Success,
  /// `--list-different` found files which are not formatted
  DifferencesFound,
  /// At least one file failed; the others were still processed
  Failure,
}

pub fn run(app: &App, config: Config) -> CommandStatus {
  if app.stdin || (app.files.is_empty() && !std::io::stdin().is_terminal()) {
    return run_stdin(app, config);
  }

  if app.files.is_empty() {
    eprintln!("{}", Message::error("No files given, and stdin is a terminal".into()));
    return CommandStatus::Failure;
  }

  let mut failed = false;
  let mut different = false;

  for file in &app.files {
    if !app.with_node_modules && file.contains("node_modules/") {
      continue;
    }
    match run_file(app, config, file) {
      FileOutcome::Ok => {}
      FileOutcome::Different => different = true,
      FileOutcome::Failed => failed = true,
    }
  }

  if failed {
    CommandStatus::Failure
  } else if different && app.list_different {
    CommandStatus::DifferencesFound
  } else {
    CommandStatus::Success
  }
}

enum FileOutcome {
  Ok,
  Different,
  Failed,
}

fn run_file(app: &App, config: Config, file: &str) -> FileOutcome {
  let source = match read_file(file) {
    Ok(source) => source,
    Err(()) => return FileOutcome::Failed,
  };

  if app.debug_print_doc {
    return print_doc(file, &source, config);
  }

  if app.debug_check {
    return match jsfmt_formatter::debug_check(&source, &config) {
      Ok(()) => FileOutcome::Ok,
      Err(error) => {
        report_error(file, &source, &error);
        FileOutcome::Failed
      }
    };
  }

  let formatted = match jsfmt_formatter::format(&source, &config) {
    Ok(formatted) => formatted,
    Err(error) => {
      report_error(file, &source, &error);
      return FileOutcome::Failed;
    }
  };

  if app.list_different {
    if formatted != source {
      println!("{file}");
      return FileOutcome::Different;
    }
    return FileOutcome::Ok;
  }

  if app.write {
    if formatted != source && fs::write(file, formatted).is_err() {
      eprintln!("{}", Message::error(format!("Problem writing to `{file}`")));
      return FileOutcome::Failed;
    }
    return FileOutcome::Ok;
  }

  print!("{formatted}");
  FileOutcome::Ok
}

fn run_stdin(app: &App, config: Config) -> CommandStatus {
  let mut source = String::new();
  if std::io::stdin().read_to_string(&mut source).is_err() {
    eprintln!("{}", Message::error("Problem reading stdin".into()));
    return CommandStatus::Failure;
  }

  if app.debug_print_doc {
    return match print_doc("-", &source, config) {
      FileOutcome::Failed => CommandStatus::Failure,
      _ => CommandStatus::Success,
    };
  }

  if app.debug_check {
    return match jsfmt_formatter::debug_check(&source, &config) {
      Ok(()) => CommandStatus::Success,
      Err(error) => {
        report_error("-", &source, &error);
        CommandStatus::Failure
      }
    };
  }

  match jsfmt_formatter::format(&source, &config) {
    Ok(formatted) => {
      if app.list_different {
        if formatted == source {
          CommandStatus::Success
        } else {
          println!("(stdin)");
          CommandStatus::DifferencesFound
        }
      } else {
        print!("{formatted}");
        CommandStatus::Success
      }
    }
    Err(error) => {
      report_error("-", &source, &error);
      CommandStatus::Failure
    }
  }
}

fn print_doc(file: &str, source: &str, config: Config) -> FileOutcome {
  let ast = jsfmt_syntax::parse(source);
  if let Some(error) = ast.errors.first() {
    eprintln!("{}", Message::from(error));
    eprintln!("{}", CodeFrame::new(file, source, error.span()));
    return FileOutcome::Failed;
  }

  let allocator = Bump::new();
  let doc = print_ast_to_doc(&ast, &allocator, config, 0);
  println!("{doc}");
  FileOutcome::Ok
}

fn report_error(file: &str, source: &str, error: &FormatError) {
  match error {
    FormatError::Parse(parse_error) => {
      eprintln!("{file}: {}", Message::from(parse_error));
      eprintln!("{}", CodeFrame::new(file, source, parse_error.span()));
    }
    _ => {
      eprintln!("{file}: {}", Message::error(error.to_string()));
    }
  }
}

fn read_file(filename: &str) -> Result<String, ()> {
  match fs::read_to_string(filename) {
    Ok(file) if file.bytes().len() > u32::MAX as usize => {
      eprintln!("{}", Message::error("File too large - max size 4GB".into()));
      Err(())
    }
    Ok(file) => Ok(file),
    Err(_) => {
      eprintln!("{}", Message::error(format!("File not found `{filename}`")));
      Err(())
    }
  }
}
