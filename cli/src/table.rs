// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

pub struct Table<'a, T, C: Column<T>> {
    pub columns: &'a [C],
    pub separator: &'a str,
    pub padding: bool,
    pub data: &'a [T],
}

impl<'a, T, C: Column<T>> Table<'a, T, C> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            separator: "  ",
            padding: true,
            data,
        }
    }
}

impl<T, C: Column<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = self.columns.iter().map(|c| c.name().to_string()).collect();
        let rows: Vec<Vec<String>> = self
            .data
            .iter()
            .map(|row| self.columns.iter().map(|col| col.format(row)).collect())
            .collect();

        let widths = self
            .padding
            .then(|| column_max_width(std::iter::once(&header).chain(&rows)));

        let last = self.columns.len().saturating_sub(1);
        for (j, (col, cell)) in self.columns.iter().zip(header).enumerate() {
            let cell = pad(cell, widths.as_deref(), j, last, col.padding_direction());
            write!(f, "{}", cell.bold())?;
            write!(f, "{}", if j < last { self.separator } else { "\n" })?;
        }

        for (cells, row) in rows.into_iter().zip(self.data) {
            for (j, (col, cell)) in self.columns.iter().zip(cells).enumerate() {
                let cell = pad(cell, widths.as_deref(), j, last, col.padding_direction());
                match col.get_color(row) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => write!(f, "{cell}")?,
                }
                write!(f, "{}", if j < last { self.separator } else { "\n" })?;
            }
        }
        Ok(())
    }
}

pub trait Column<T> {
    fn name(&self) -> &'static str;
    fn format(&self, data: &T) -> String;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

fn pad(
    cell: String,
    widths: Option<&[usize]>,
    index: usize,
    last: usize,
    direction: PaddingDirection,
) -> String {
    // last column does not need padding if it's left-aligned
    let Some(width) = widths.and_then(|w| w.get(index)).copied() else {
        return cell;
    };
    let fill = width.saturating_sub(cell.width());
    match direction {
        PaddingDirection::Left if index == last => cell,
        PaddingDirection::Left => format!("{cell}{}", " ".repeat(fill)),
        PaddingDirection::Right => format!("{}{cell}", " ".repeat(fill)),
    }
}

fn column_max_width<'a>(rows: impl Iterator<Item = &'a Vec<String>>) -> Vec<usize> {
    let mut max_width: Vec<usize> = Vec::new();
    for row in rows {
        if max_width.len() < row.len() {
            max_width.resize(row.len(), 0);
        }
        for (i, cell) in row.iter().enumerate() {
            max_width[i] = max_width[i].max(cell.width());
        }
    }
    max_width
}
