use std::io;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::rc::Rc;
use undoable::change::{PropertyChange, StateChange};
use undoable::item::{EditableItem, ItemBuilder};
use undoable::state::EditableState;

#[derive(Clone, PartialEq)]
struct Note {
    title: String,
    body: String,
}

impl Note {
    fn empty() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
        }
    }
}

impl EditableState for Note {
    fn restore(&mut self, snapshot: &Self) {
        self.title = snapshot.title.clone();
        self.body = snapshot.body.clone();
    }

    fn diff(old: &Self, new: &Self) -> Vec<Rc<dyn StateChange>> {
        let mut changes: Vec<Rc<dyn StateChange>> = Vec::new();
        if old.title != new.title {
            changes.push(Rc::new(PropertyChange::new(
                "title",
                old.title.clone(),
                new.title.clone(),
            )));
        }
        if old.body != new.body {
            changes.push(Rc::new(PropertyChange::new(
                "body",
                old.body.clone(),
                new.body.clone(),
            )));
        }
        changes
    }
}

const COMMAND_HELP: &str = "COMMANDS
 :h        | Print command help.
 :p        | Print the note and the transaction state.
 :b        | Begin an edit transaction.
 :t TITLE  | Set the note title.
 :a TEXT   | Append TEXT to the note body.
 :c        | Commit the open transaction.
 :x        | Cancel the open transaction.
 :e        | End the open transaction.
 :u        | Undo the last committed change.
 :r        | Redo the last undone change.
 :q        | Quit the program.";

fn print_note<W: Write>(writer: &mut W, item: &EditableItem<Note>) -> io::Result<()> {
    writeln!(
        writer,
        "[editing: {}, can_undo: {}, can_redo: {}]",
        item.is_in_edit_mode(),
        item.can_undo(),
        item.can_redo()
    )?;
    writeln!(writer, "# {}", item.title)?;
    writeln!(writer, "{}", item.body)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Transactional note editor.\n\n{}", COMMAND_HELP);

    let mut note = ItemBuilder::new().history_levels(100).build(Note::empty());
    note.on_edit_committed(|record| {
        println!("committed {} change(s):", record.len());
        for change in record.changes() {
            println!("  {:?}", change);
        }
    });

    let mut stdout = BufWriter::new(io::stdout().lock());
    let mut stdin = BufReader::new(io::stdin().lock());

    let mut command_str = String::new();
    loop {
        command_str.clear();

        write!(&mut stdout, ":")?;
        stdout.flush()?;

        if 0 == stdin.read_line(&mut command_str)? {
            return Ok(());
        }

        let command_str = command_str.trim_end_matches(['\r', '\n']);
        let (name, param) = match command_str.split_once(' ') {
            Some((name, param)) => (name, param),
            None => (command_str, ""),
        };

        let result = match name {
            "q" => return Ok(()),
            "p" => {
                print_note(&mut stdout, &note)?;
                stdout.flush()?;
                Ok(())
            }
            "b" => {
                note.begin_edit();
                Ok(())
            }
            "t" => {
                note.data_mut().title = param.to_string();
                Ok(())
            }
            "a" => {
                note.data_mut().body.push_str(param);
                note.data_mut().body.push('\n');
                Ok(())
            }
            "c" => note.commit_edit().map(|_| ()),
            "x" => note.cancel_edit(),
            "e" => note.end_edit(),
            "u" => {
                note.undo();
                Ok(())
            }
            "r" => {
                note.redo();
                Ok(())
            }
            _ => {
                writeln!(&mut stdout, "{}", COMMAND_HELP)?;
                Ok(())
            }
        };

        if let Err(e) = result {
            writeln!(&mut stdout, "error: {}", e)?;
            stdout.flush()?;
        }
    }
}
