//! Outline document service
//!
//! Loads a document (or a zoomed-in item of it), applies one edit through
//! the domain mutators, persists the result and tells the caller where the
//! focus goes next.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::mutator::{
    try_add_item, try_delete_item, try_indent_item, try_outdent_item,
    try_swap_with_previous, try_toggle_expanded, try_update_symbol, try_update_text,
};
use crate::domain::{
    find, find_next, find_prev, find_prev_for_delete, get_breadcrumb, update_children, Crumb,
    Edit, Forest, Node, Refusal, Symbol,
};
use crate::infrastructure::traits::{DocumentStore, IdGenerator};

/// Scope id meaning "the whole document" rather than one item's children.
pub const ROOT_ID: &str = "root";

/// Document shared by everybody, next to each user's own document.
pub const SHARED_DOCUMENT: &str = "share";

/// One user-level edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    SetText { id: String, text: String },
    SetSymbol { id: String, symbol: Symbol },
    Toggle { id: String },
    /// Enter on `id`
    Add { id: String },
    /// New node at the end of the top level of the scope
    AddRoot,
    Delete { id: String, force: bool },
    Indent { id: String },
    Outdent { id: String },
    MoveUp { id: String },
}

/// Visible-order navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Result of [`OutlineService::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// Forest of the edited scope after the edit
    pub forest: Forest,
    /// Id the caller should focus next
    pub focus: String,
    /// Why nothing changed, if the edit did not apply
    pub refusal: Option<Refusal>,
}

impl Applied {
    pub fn changed(&self) -> bool {
        self.refusal.is_none()
    }
}

/// Service for reading and editing outline documents.
pub struct OutlineService {
    store: Arc<dyn DocumentStore>,
    ids: Arc<dyn IdGenerator>,
}

impl OutlineService {
    pub fn new(store: Arc<dyn DocumentStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    /// Load a document for editing. An empty document gets one fresh node so
    /// there is always something to type into; it is stored on the next save.
    pub fn open(&self, name: &str) -> ApplicationResult<Forest> {
        let forest = self.store.load(name)?;
        if forest.is_empty() {
            debug!("open: {} is empty, seeding", name);
            return Ok(vec![Node::new(self.ids.next_id())]);
        }
        Ok(forest)
    }

    /// Load one item of a document as the root of a zoomed-in view.
    ///
    /// An item without children gets a fresh child so the view is editable.
    pub fn open_item(&self, name: &str, item_id: &str) -> ApplicationResult<Node> {
        let forest = self.open(name)?;
        let mut item = find(&forest, item_id)?.clone();
        if item.children.is_empty() {
            item.children.push(Node::new(self.ids.next_id()));
        }
        Ok(item)
    }

    /// Forest edited within `scope`: the whole document or one item's children.
    pub fn load_scope(&self, name: &str, scope: &str) -> ApplicationResult<Forest> {
        if scope == ROOT_ID {
            self.open(name)
        } else {
            Ok(self.open_item(name, scope)?.children)
        }
    }

    /// Like [`Self::load_scope`], but a seeded node is stored right away so
    /// its id stays valid for the next command.
    pub fn view(&self, name: &str, scope: &str) -> ApplicationResult<Forest> {
        let stored = self.store.load(name)?;
        let existing = if scope == ROOT_ID {
            stored
        } else {
            find(&stored, scope)?.children.clone()
        };
        if !existing.is_empty() {
            return Ok(existing);
        }
        let seeded = self.load_scope(name, scope)?;
        self.save_items(name, scope, &seeded)?;
        Ok(seeded)
    }

    /// Persist `items` as the whole document (`ROOT_ID`) or as the children
    /// of `item_id` inside the stored document.
    #[instrument(level = "debug", skip(self, items))]
    pub fn save_items(&self, name: &str, item_id: &str, items: &[Node]) -> ApplicationResult<()> {
        if item_id == ROOT_ID {
            return self.store.save(name, items);
        }
        let root = self.store.load(name)?;
        find(&root, item_id)?;
        self.store.save(name, &update_children(&root, item_id, items))
    }

    /// Apply one edit inside `scope` and persist the result if it applied.
    #[instrument(level = "debug", skip(self))]
    pub fn apply(
        &self,
        name: &str,
        scope: &str,
        command: &EditCommand,
    ) -> ApplicationResult<Applied> {
        let forest = self.load_scope(name, scope)?;
        let (edit, focus) = self.run(&forest, command);

        match edit {
            Edit::Applied(updated) => {
                self.save_items(name, scope, &updated)?;
                debug!("apply: {:?} applied, focus={}", command, focus);
                Ok(Applied {
                    forest: updated,
                    focus,
                    refusal: None,
                })
            }
            Edit::Refused(reason) => {
                debug!("apply: {:?} refused: {}", command, reason);
                Ok(Applied {
                    focus: target_of(command).unwrap_or_default().to_string(),
                    forest,
                    refusal: Some(reason),
                })
            }
        }
    }

    fn run(&self, forest: &[Node], command: &EditCommand) -> (Edit, String) {
        match command {
            EditCommand::SetText { id, text } => (try_update_text(forest, id, text), id.clone()),
            EditCommand::SetSymbol { id, symbol } => {
                (try_update_symbol(forest, id, *symbol), id.clone())
            }
            EditCommand::Toggle { id } => (try_toggle_expanded(forest, id), id.clone()),
            EditCommand::Add { id } => {
                let new_id = self.ids.next_id();
                (try_add_item(forest, id, &new_id), new_id)
            }
            EditCommand::AddRoot => {
                let node = Node::new(self.ids.next_id());
                let new_id = node.id.clone();
                let mut appended = forest.to_vec();
                appended.push(node);
                (Edit::Applied(appended), new_id)
            }
            EditCommand::Delete { id, force } => (
                try_delete_item(forest, id, *force),
                find_prev_for_delete(forest, id),
            ),
            EditCommand::Indent { id } => {
                let new_id = self.ids.next_id();
                (try_indent_item(forest, id, &new_id), new_id)
            }
            EditCommand::Outdent { id } => {
                let new_id = self.ids.next_id();
                (try_outdent_item(forest, id, &new_id), new_id)
            }
            EditCommand::MoveUp { id } => {
                let new_id = self.ids.next_id();
                (try_swap_with_previous(forest, id, &new_id), new_id)
            }
        }
    }

    /// Neighbour of `id` in visible order; at either end the focus stays on `id`.
    pub fn navigate(
        &self,
        name: &str,
        scope: &str,
        id: &str,
        direction: Direction,
    ) -> ApplicationResult<String> {
        let forest = self.load_scope(name, scope)?;
        find(&forest, id)?;
        let neighbour = match direction {
            Direction::Prev => find_prev(&forest, id),
            Direction::Next => find_next(&forest, id),
        };
        Ok(neighbour.unwrap_or_else(|_| id.to_string()))
    }

    /// Root-first path to `id` in the whole document.
    pub fn breadcrumb(&self, name: &str, id: &str) -> ApplicationResult<Vec<Crumb>> {
        let forest = self.store.load(name)?;
        Ok(get_breadcrumb(&forest, id)?)
    }

    /// Stored document exactly as persisted (no seeding).
    pub fn export(&self, name: &str) -> ApplicationResult<Forest> {
        self.store.load(name)
    }

    /// Replace a document with an externally supplied forest.
    pub fn import(&self, name: &str, forest: &[Node]) -> ApplicationResult<()> {
        check_unique_ids(name, forest)?;
        self.store.save(name, forest)
    }

    pub fn documents(&self) -> ApplicationResult<Vec<String>> {
        self.store.list()
    }
}

fn target_of(command: &EditCommand) -> Option<&str> {
    match command {
        EditCommand::SetText { id, .. }
        | EditCommand::SetSymbol { id, .. }
        | EditCommand::Toggle { id }
        | EditCommand::Add { id }
        | EditCommand::Delete { id, .. }
        | EditCommand::Indent { id }
        | EditCommand::Outdent { id }
        | EditCommand::MoveUp { id } => Some(id.as_str()),
        EditCommand::AddRoot => None,
    }
}

/// Ids must be unique across the whole forest.
fn check_unique_ids(name: &str, forest: &[Node]) -> ApplicationResult<()> {
    fn walk<'a>(list: &'a [Node], seen: &mut HashSet<&'a str>) -> Result<(), &'a str> {
        for node in list {
            if !seen.insert(node.id.as_str()) {
                return Err(node.id.as_str());
            }
            walk(&node.children, seen)?;
        }
        Ok(())
    }

    let mut seen = HashSet::new();
    walk(forest, &mut seen).map_err(|dup| ApplicationError::InvalidDocument {
        name: name.to_string(),
        message: format!("duplicate id: {dup}"),
    })
}
