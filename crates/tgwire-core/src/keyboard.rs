//! Keyboard grid builders.
//!
//! Every builder accepts bare labels and concrete buttons interchangeably
//! through [`ButtonLike`]. The resulting rows feed
//! [`ReplyKeyboardMarkup::new`](crate::model::ReplyKeyboardMarkup::new) or
//! [`InlineKeyboardMarkup::new`](crate::model::InlineKeyboardMarkup::new),
//! which promote labels to buttons.

use crate::error::{MappingError, MappingResult};
use crate::model::ButtonLike;

/// One row of a keyboard.
pub type Row<B> = Vec<ButtonLike<B>>;

/// Builds a single row.
///
/// # Errors
///
/// Returns [`MappingError::EmptyRow`] if `items` is empty.
pub fn row<B, T, I>(items: I) -> MappingResult<Row<B>>
where
    I: IntoIterator<Item = T>,
    T: Into<ButtonLike<B>>,
{
    let row: Row<B> = items.into_iter().map(Into::into).collect();
    if row.is_empty() {
        return Err(MappingError::EmptyRow);
    }
    Ok(row)
}

/// Splits a flat sequence into consecutive rows of `per_row` buttons.
///
/// Order is preserved; the last row may be shorter.
///
/// # Errors
///
/// Returns [`MappingError::ZeroRowWidth`] if `per_row` is zero.
pub fn from_rows_of<B, T, I>(items: I, per_row: usize) -> MappingResult<Vec<Row<B>>>
where
    I: IntoIterator<Item = T>,
    T: Into<ButtonLike<B>>,
{
    if per_row == 0 {
        return Err(MappingError::ZeroRowWidth);
    }

    let mut rows = Vec::new();
    let mut current = Vec::with_capacity(per_row);
    for item in items {
        current.push(item.into());
        if current.len() == per_row {
            rows.push(std::mem::replace(&mut current, Vec::with_capacity(per_row)));
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    Ok(rows)
}

/// Wraps pre-built rows as a grid, unchanged.
pub fn construct<B, I>(rows: I) -> Vec<Row<B>>
where
    I: IntoIterator<Item = Row<B>>,
{
    rows.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton};

    fn labels(rows: &[Row<KeyboardButton>]) -> Vec<Vec<&str>> {
        rows.iter()
            .map(|row| {
                row.iter()
                    .map(|b| match b {
                        ButtonLike::Label(text) => text.as_str(),
                        ButtonLike::Button(button) => button.text.as_str(),
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_from_rows_of() {
        let rows = from_rows_of::<KeyboardButton, _, _>(["a", "b", "c", "d", "e"], 3).unwrap();
        assert_eq!(labels(&rows), vec![vec!["a", "b", "c"], vec!["d", "e"]]);
    }

    #[test]
    fn test_from_rows_of_exact_multiple() {
        let rows = from_rows_of::<KeyboardButton, _, _>(["a", "b", "c", "d"], 2).unwrap();
        assert_eq!(labels(&rows), vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = from_rows_of::<KeyboardButton, _, _>(["a"], 0).unwrap_err();
        assert_eq!(err, MappingError::ZeroRowWidth);
    }

    #[test]
    fn test_empty_row_rejected() {
        let err = row::<KeyboardButton, &str, _>([]).unwrap_err();
        assert_eq!(err, MappingError::EmptyRow);
    }

    #[test]
    fn test_construct_mixes_labels_and_buttons() {
        let grid: Vec<Row<InlineKeyboardButton>> = construct([
            row([
                ButtonLike::from("Yes"),
                InlineKeyboardButton::callback("No", "n").into(),
            ])
            .unwrap(),
            row(["Maybe"]).unwrap(),
        ]);
        let markup = InlineKeyboardMarkup::new(grid);
        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard[0][0].callback_data, None);
        assert_eq!(markup.inline_keyboard[0][1].callback_data.as_deref(), Some("n"));
        assert_eq!(markup.inline_keyboard[1][0].text, "Maybe");
    }
}
