//! Free-text search helpers shared by the user and patient repositories.

use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition};

/// Escape character used in every generated LIKE pattern.
const LIKE_ESCAPE: char = '\\';

/// Escape LIKE wildcards so they are matched literally.
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Case-insensitive "contains" over any of `columns`.
///
/// Returns `None` for a blank term so callers skip the filter entirely.
pub(crate) fn contains_any<C: ColumnTrait>(columns: &[C], term: &str) -> Option<Condition> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));

    let condition = columns.iter().fold(Condition::any(), |condition, column| {
        condition.add(
            Expr::expr(Func::lower(Expr::col(*column)))
                .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)),
        )
    });

    Some(condition)
}
