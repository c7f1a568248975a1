//! Order bookkeeping shared by the authoring handlers.
//!
//! Active questions of a questionnaire must have distinct orders, and every
//! conditional child must sit at the order its parent allocates for it.

use std::collections::VecDeque;

use crate::application::DiaryError;
use crate::domain::foundation::QuestionId;
use crate::domain::questionnaire::Question;
use crate::ports::QuestionRepository;

/// Fails if an active question outside `moving` already holds `order`.
pub(super) fn ensure_order_free(
    siblings: &[Question],
    order: u32,
    moving: &[QuestionId],
) -> Result<(), DiaryError> {
    let taken = siblings
        .iter()
        .any(|q| q.order() == order && !q.is_deleted() && !moving.contains(&q.id()));
    if taken {
        return Err(DiaryError::DuplicateOrder(order));
    }
    Ok(())
}

/// Descendants of `parent` whose order must change to match its allocation.
///
/// Walks the whole subtree level by level, so grandchildren follow a child
/// that moves. Every target order is checked against `siblings` before
/// anything is returned. Children missing from `siblings` (deleted ones)
/// are left alone, and so is everything below them.
pub(super) fn plan_child_orders(
    parent: &Question,
    siblings: &[Question],
) -> Result<Vec<Question>, DiaryError> {
    let mut subtree: Vec<QuestionId> = vec![parent.id()];
    let mut planned: Vec<(u32, Question)> = Vec::new();
    let mut pending: VecDeque<Question> = VecDeque::from([parent.clone()]);

    while let Some(current) = pending.pop_front() {
        for (child_id, order) in current.child_orders()? {
            if subtree.contains(&child_id) {
                continue;
            }
            subtree.push(child_id);
            let Some(child) = siblings.iter().find(|q| q.id() == child_id) else {
                continue;
            };
            let mut child = child.clone();
            let previous = child.order();
            child.assign_order(order);
            pending.push_back(child.clone());
            planned.push((previous, child));
        }
    }

    let mut moved = Vec::new();
    for (previous, child) in planned {
        if child.order() == previous {
            continue;
        }
        ensure_order_free(siblings, child.order(), &subtree)?;
        moved.push(child);
    }
    Ok(moved)
}

/// Persists children moved by [`plan_child_orders`].
pub(super) async fn save_moved_children(
    questions: &dyn QuestionRepository,
    parent: &Question,
    moved: &[Question],
) -> Result<usize, DiaryError> {
    for child in moved {
        questions.save(child).await?;
        tracing::debug!(
            question_id = %child.id(),
            parent_id = %parent.id(),
            order = child.order(),
            "Conditional child reordered"
        );
    }
    Ok(moved.len())
}
