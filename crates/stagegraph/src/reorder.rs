//! Cancelable staging area for drag-based reordering and deletion.
//!
//! A [`ReorderSession`] works on its own copy of the transform chain. Drags
//! and deletions only touch that copy; the committed model changes only when
//! [`ReorderSession::apply`] succeeds.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, trace};

use stagegraph_core::{identifier::Id, stage::TransformStage};

use crate::{editor::GraphEditor, error::StagegraphError, model::PipelineGraphModel};

#[derive(Debug, Clone, Default)]
enum SessionState {
    #[default]
    Idle,
    Editing {
        working: IndexMap<Id, TransformStage>,
        deleted: Vec<Id>,
    },
}

/// Working copy of a model's transforms, separate from the committed model.
///
/// | State   | Action          | Result                                   |
/// |---------|-----------------|------------------------------------------|
/// | idle    | [`open`]        | working list := committed transforms     |
/// | editing | [`move_item`]   | working list reordered                   |
/// | editing | [`mark_delete`] | item removed from the working list only  |
/// | editing | [`apply`]       | working list committed; back to idle     |
/// | editing | [`cancel`]      | working list discarded; back to idle     |
///
/// [`open`]: ReorderSession::open
/// [`move_item`]: ReorderSession::move_item
/// [`mark_delete`]: ReorderSession::mark_delete
/// [`apply`]: ReorderSession::apply
/// [`cancel`]: ReorderSession::cancel
///
/// # Examples
///
/// ```
/// use stagegraph::{editor::GraphEditor, model::PipelineGraphModel, reorder::ReorderSession};
/// use stagegraph_core::{identifier::Id, stage::TransformStage};
///
/// let model = GraphEditor::add_transforms(
///     &PipelineGraphModel::new(),
///     vec![
///         TransformStage::new(Id::new("t1"), "Route"),
///         TransformStage::new(Id::new("t2"), "Mask"),
///     ],
/// )
/// .unwrap();
///
/// let mut session = ReorderSession::new();
/// session.open(&model);
/// session.move_item(1, 0).unwrap();
/// let model = session.apply(&model).unwrap();
/// assert_eq!(model.transform_ids(), vec![Id::new("t2"), Id::new("t1")]);
/// assert!(!session.is_open());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReorderSession {
    state: SessionState,
}

impl ReorderSession {
    /// Creates an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Editing { .. })
    }

    /// Starts editing a copy of `committed`'s transforms.
    ///
    /// Opening an already open session discards its pending edits.
    pub fn open(&mut self, committed: &PipelineGraphModel) {
        let working: IndexMap<Id, TransformStage> = committed
            .transforms()
            .iter()
            .map(|transform| (transform.id(), transform.clone()))
            .collect();
        debug!(transform_count = working.len(); "Reorder session opened");
        self.state = SessionState::Editing {
            working,
            deleted: Vec::new(),
        };
    }

    /// Transforms of the working list, in their pending order.
    ///
    /// # Errors
    ///
    /// Returns [`StagegraphError::SessionNotOpen`] if the session is idle.
    pub fn working_list(&self) -> Result<Vec<&TransformStage>, StagegraphError> {
        let (working, _) = self.editing()?;
        Ok(working.values().collect())
    }

    /// Ids marked for deletion, in the order they were marked.
    ///
    /// # Errors
    ///
    /// Returns [`StagegraphError::SessionNotOpen`] if the session is idle.
    pub fn pending_deletions(&self) -> Result<&[Id], StagegraphError> {
        let (_, deleted) = self.editing()?;
        Ok(deleted)
    }

    /// Moves the item at index `from` to index `to`, as a drag does.
    ///
    /// # Errors
    ///
    /// Returns [`StagegraphError::SessionNotOpen`] if the session is idle, or
    /// [`StagegraphError::InvalidReorder`] if either index is out of range.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), StagegraphError> {
        let (working, _) = self.editing_mut()?;
        let len = working.len();
        if from >= len || to >= len {
            return Err(StagegraphError::invalid_reorder(format!(
                "cannot move item {from} to {to} in a list of {len}"
            )));
        }
        working.move_index(from, to);
        trace!(from, to; "Moved transform in working list");
        Ok(())
    }

    /// Replaces the pending order with `new_order`.
    ///
    /// # Errors
    ///
    /// Returns [`StagegraphError::SessionNotOpen`] if the session is idle, or
    /// [`StagegraphError::InvalidReorder`] unless `new_order` is a permutation
    /// of the working list. The working list is unchanged on error.
    pub fn reorder_to(&mut self, new_order: &[Id]) -> Result<(), StagegraphError> {
        let (working, _) = self.editing_mut()?;
        if new_order.len() != working.len() {
            return Err(StagegraphError::invalid_reorder(format!(
                "expected {} ids, got {}",
                working.len(),
                new_order.len()
            )));
        }

        let mut seen = HashSet::with_capacity(new_order.len());
        for &id in new_order {
            if !seen.insert(id) {
                return Err(StagegraphError::invalid_reorder(format!(
                    "`{id}` appears more than once"
                )));
            }
            if !working.contains_key(&id) {
                return Err(StagegraphError::invalid_reorder(format!(
                    "`{id}` is not in the working list"
                )));
            }
        }

        for (index, id) in new_order.iter().enumerate() {
            if let Some(current) = working.get_index_of(id) {
                working.move_index(current, index);
            }
        }
        trace!(order:? = new_order; "Reordered working list");
        Ok(())
    }

    /// Removes a transform from the working list only.
    ///
    /// # Errors
    ///
    /// Returns [`StagegraphError::SessionNotOpen`] if the session is idle, or
    /// [`StagegraphError::UnknownStage`] if `id` is not in the working list.
    pub fn mark_delete(&mut self, id: Id) -> Result<(), StagegraphError> {
        let (working, deleted) = self.editing_mut()?;
        if working.shift_remove(&id).is_none() {
            return Err(StagegraphError::UnknownStage(id));
        }
        deleted.push(id);
        trace!(deleted:% = id, remaining = working.len(); "Marked transform for deletion");
        Ok(())
    }

    /// Model that [`apply`](Self::apply) would produce, leaving the session
    /// open.
    ///
    /// # Errors
    ///
    /// Same as [`apply`](Self::apply).
    pub fn preview(
        &self,
        committed: &PipelineGraphModel,
    ) -> Result<PipelineGraphModel, StagegraphError> {
        let (working, deleted) = self.editing()?;

        let mut model = committed.clone();
        for &id in deleted {
            model = GraphEditor::remove_transform(&model, id)?;
        }
        let order: Vec<Id> = working.keys().copied().collect();
        GraphEditor::reorder_transforms(&model, &order)
    }

    /// Commits the working list into a new model and closes the session.
    ///
    /// # Errors
    ///
    /// Returns [`StagegraphError::SessionNotOpen`] if the session is idle,
    /// [`StagegraphError::UnknownStage`] if a deleted transform is no longer
    /// in `committed`, or [`StagegraphError::InvalidReorder`] if `committed`
    /// no longer matches the working list. On error the session stays open
    /// and `committed` is untouched.
    pub fn apply(
        &mut self,
        committed: &PipelineGraphModel,
    ) -> Result<PipelineGraphModel, StagegraphError> {
        let model = self.preview(committed)?;
        self.state = SessionState::Idle;
        debug!(transform_count = model.transform_count(); "Reorder session applied");
        Ok(model)
    }

    /// Discards the working list. Closing an idle session is a no-op.
    pub fn cancel(&mut self) {
        if self.is_open() {
            debug!("Reorder session cancelled");
        }
        self.state = SessionState::Idle;
    }

    fn editing(&self) -> Result<(&IndexMap<Id, TransformStage>, &[Id]), StagegraphError> {
        match &self.state {
            SessionState::Editing { working, deleted } => Ok((working, deleted.as_slice())),
            SessionState::Idle => Err(StagegraphError::SessionNotOpen),
        }
    }

    fn editing_mut(
        &mut self,
    ) -> Result<(&mut IndexMap<Id, TransformStage>, &mut Vec<Id>), StagegraphError> {
        match &mut self.state {
            SessionState::Editing { working, deleted } => Ok((working, deleted)),
            SessionState::Idle => Err(StagegraphError::SessionNotOpen),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn committed() -> PipelineGraphModel {
        let stages = ["t1", "t2", "t3"]
            .iter()
            .map(|id| TransformStage::new(Id::new(id), id.to_uppercase()))
            .collect();
        GraphEditor::add_transforms(&PipelineGraphModel::new(), stages).unwrap()
    }

    fn ids(names: &[&str]) -> Vec<Id> {
        names.iter().map(|name| Id::new(name)).collect()
    }

    fn working_ids(session: &ReorderSession) -> Vec<Id> {
        session
            .working_list()
            .unwrap()
            .into_iter()
            .map(TransformStage::id)
            .collect()
    }

    #[test]
    fn test_idle_session_rejects_edits() {
        let mut session = ReorderSession::new();
        assert!(!session.is_open());
        assert!(matches!(
            session.move_item(0, 1),
            Err(StagegraphError::SessionNotOpen)
        ));
        assert!(matches!(
            session.mark_delete(Id::new("t1")),
            Err(StagegraphError::SessionNotOpen)
        ));
        assert!(matches!(
            session.apply(&committed()),
            Err(StagegraphError::SessionNotOpen)
        ));
        assert!(session.working_list().is_err());
    }

    #[test]
    fn test_open_clones_committed_transforms() {
        let model = committed();
        let mut session = ReorderSession::new();
        session.open(&model);

        assert!(session.is_open());
        assert_eq!(working_ids(&session), model.transform_ids());
        assert!(session.pending_deletions().unwrap().is_empty());
    }

    #[test]
    fn test_edits_do_not_touch_committed_model() {
        let model = committed();
        let snapshot = model.clone();
        let mut session = ReorderSession::new();
        session.open(&model);

        session.move_item(0, 2).unwrap();
        session.mark_delete(Id::new("t2")).unwrap();
        assert_eq!(working_ids(&session), ids(&["t3", "t1"]));

        session.cancel();
        assert!(!session.is_open());
        assert_eq!(model, snapshot);
    }

    #[test]
    fn test_apply_commits_order_and_deletions() {
        let model = committed();
        let mut session = ReorderSession::new();
        session.open(&model);

        session.reorder_to(&ids(&["t3", "t1", "t2"])).unwrap();
        session.mark_delete(Id::new("t1")).unwrap();
        assert_eq!(session.pending_deletions().unwrap(), ids(&["t1"]).as_slice());

        let preview = session.preview(&model).unwrap();
        assert!(session.is_open());

        let applied = session.apply(&model).unwrap();
        assert_eq!(applied, preview);
        assert_eq!(applied.transform_ids(), ids(&["t3", "t2"]));
        assert!(!session.is_open());
    }

    #[test]
    fn test_deleting_everything_resets_collapse() {
        let model = GraphEditor::collapse(&committed());
        let mut session = ReorderSession::new();
        session.open(&model);
        for id in ids(&["t1", "t2", "t3"]) {
            session.mark_delete(id).unwrap();
        }

        let applied = session.apply(&model).unwrap();
        assert_eq!(applied.transform_count(), 0);
        assert!(!applied.is_transform_chain_collapsed());
    }

    #[test]
    fn test_invalid_reorder_leaves_working_list() {
        let mut session = ReorderSession::new();
        session.open(&committed());

        assert!(matches!(
            session.reorder_to(&ids(&["t2", "t3"])),
            Err(StagegraphError::InvalidReorder { .. })
        ));
        assert!(matches!(
            session.reorder_to(&ids(&["t2", "t2", "t3"])),
            Err(StagegraphError::InvalidReorder { .. })
        ));
        assert!(matches!(
            session.reorder_to(&ids(&["t2", "t9", "t3"])),
            Err(StagegraphError::InvalidReorder { .. })
        ));
        assert!(matches!(
            session.move_item(0, 3),
            Err(StagegraphError::InvalidReorder { .. })
        ));
        assert_eq!(working_ids(&session), ids(&["t1", "t2", "t3"]));
    }

    #[test]
    fn test_mark_delete_unknown_id() {
        let mut session = ReorderSession::new();
        session.open(&committed());
        session.mark_delete(Id::new("t1")).unwrap();

        assert!(matches!(
            session.mark_delete(Id::new("t1")),
            Err(StagegraphError::UnknownStage(_))
        ));
    }

    #[test]
    fn test_apply_against_changed_model_fails_and_stays_open() {
        let model = committed();
        let mut session = ReorderSession::new();
        session.open(&model);
        session.move_item(2, 0).unwrap();

        let grown = GraphEditor::add_transform(&model, TransformStage::new(Id::new("t4"), "T4"))
            .unwrap();
        assert!(matches!(
            session.apply(&grown),
            Err(StagegraphError::InvalidReorder { .. })
        ));
        assert!(session.is_open());
        assert_eq!(grown.transform_ids(), ids(&["t1", "t2", "t3", "t4"]));
    }

    #[test]
    fn test_reopen_discards_pending_edits() {
        let model = committed();
        let mut session = ReorderSession::new();
        session.open(&model);
        session.mark_delete(Id::new("t2")).unwrap();

        session.open(&model);
        assert_eq!(working_ids(&session), model.transform_ids());
        assert!(session.pending_deletions().unwrap().is_empty());
    }
}
