/// Nested-items demo
/// This program shows how a captured sub-item's commits cascade into its
/// parent, flattening a tree of editable objects into one timeline.
use std::cell::RefCell;
use std::rc::Rc;
use undoable::change::{PropertyChange, StateChange, SubItemChange};
use undoable::item::EditableItem;
use undoable::state::EditableState;

#[derive(Clone, PartialEq, Debug)]
struct Field(i32);

impl EditableState for Field {
    fn restore(&mut self, snapshot: &Self) {
        self.0 = snapshot.0;
    }

    fn diff(old: &Self, new: &Self) -> Vec<Rc<dyn StateChange>> {
        if old.0 != new.0 {
            vec![Rc::new(PropertyChange::new("field", old.0, new.0))]
        } else {
            Vec::new()
        }
    }
}

fn describe(change: &dyn StateChange, indent: usize) {
    let pad = "  ".repeat(indent);
    if let Some(sub) = change.as_any().downcast_ref::<SubItemChange>() {
        println!("{}sub-item {} committed:", pad, sub.sub_item);
        for inner in &sub.changes {
            describe(inner.as_ref(), indent + 1);
        }
    } else if let Some(prop) = change.as_any().downcast_ref::<PropertyChange<i32>>() {
        println!(
            "{}property '{}': {} -> {}",
            pad, prop.property, prop.old_value, prop.new_value
        );
    }
}

fn main() {
    env_logger::init();

    let document = Rc::new(RefCell::new(EditableItem::new(Field(0))));
    let paragraph = Rc::new(RefCell::new(EditableItem::new(Field(0))));
    let word = Rc::new(RefCell::new(EditableItem::new(Field(1))));

    println!("# CAPTURE #");
    println!("document {} captures paragraph {}", document.borrow().id(), paragraph.borrow().id());
    println!("paragraph {} captures word {}", paragraph.borrow().id(), word.borrow().id());
    EditableItem::capture_sub_item(&document, &paragraph).unwrap();
    EditableItem::capture_sub_item(&paragraph, &word).unwrap();

    document.borrow_mut().on_edit_committed(|record| {
        println!("\n# DOCUMENT COMMIT NOTIFICATION #");
        for change in record.changes() {
            describe(change.as_ref(), 1);
        }
    });

    println!("\n# EDIT THE INNERMOST WORD #");
    {
        let mut word = word.borrow_mut();
        word.begin_edit();
        word.data_mut().0 = 42;
        word.commit_edit().unwrap();
        word.end_edit().unwrap();
    }

    println!("\n# UNDO THROUGH THE WORD #");
    // The word is captured, so this forwards to the paragraph and from
    // there to the document; no local state of the word changes.
    word.borrow_mut().undo();
    println!("word is still {:?}", *word.borrow());
    println!("document can_undo: {}", document.borrow().can_undo());
}
