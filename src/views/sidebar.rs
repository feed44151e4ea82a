use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::catalog::Group;
use crate::dashboard::Controls;
use crate::data::{ChartStyle, Period};
use crate::helper::cycle;
use crate::ui::styles;

pub const WIDTH: u16 = 30;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumIter)]
pub enum Focus {
    #[default]
    Group,
    Companies,
    Period,
    Chart,
}

impl Focus {
    fn index(self) -> usize {
        self as usize
    }

    fn all() -> Vec<Self> {
        <Self as strum::IntoEnumIterator>::iter().collect()
    }

    fn title(self) -> String {
        match self {
            Self::Group => t!("sidebar.group"),
            Self::Companies => t!("sidebar.companies"),
            Self::Period => t!("sidebar.period"),
            Self::Chart => t!("sidebar.chart"),
        }
    }

    /// Number of options under this control
    fn len(self, controls: &Controls) -> usize {
        match self {
            Self::Group => Group::iter().count(),
            Self::Companies => controls.group.len(),
            Self::Period => Period::iter().count(),
            Self::Chart => ChartStyle::iter().count(),
        }
    }
}

/// Focus and per-control cursor of the sidebar
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sidebar {
    pub focus: Focus,
    cursors: [usize; 4],
}

impl Sidebar {
    /// Cursors start on the current values
    pub fn new(controls: &Controls) -> Self {
        let position = |found: Option<usize>| found.unwrap_or_default();
        Self {
            focus: Focus::default(),
            cursors: [
                position(Group::iter().position(|g| g == controls.group)),
                0,
                position(Period::iter().position(|p| p == controls.period)),
                position(ChartStyle::iter().position(|c| c == controls.chart)),
            ],
        }
    }

    pub fn cursor(&self, focus: Focus) -> usize {
        self.cursors[focus.index()]
    }

    pub fn focus_next(&mut self) {
        let all = Focus::all();
        self.focus = all[cycle::next(self.focus.index(), all.len())];
    }

    pub fn focus_prev(&mut self) {
        let all = Focus::all();
        self.focus = all[cycle::prev(self.focus.index(), all.len())];
    }

    pub fn cursor_down(&mut self, controls: &Controls) {
        let len = self.focus.len(controls);
        let cursor = &mut self.cursors[self.focus.index()];
        *cursor = cycle::next(*cursor, len);
    }

    pub fn cursor_up(&mut self, controls: &Controls) {
        let len = self.focus.len(controls);
        let cursor = &mut self.cursors[self.focus.index()];
        *cursor = cycle::prev(*cursor, len);
    }

    /// Apply the option under the cursor; `true` when a control value changed
    pub fn activate(&mut self, controls: &mut Controls) -> bool {
        let cursor = self.cursor(self.focus);
        match self.focus {
            Focus::Group => match Group::iter().nth(cursor) {
                Some(group) if group != controls.group => {
                    controls.set_group(group);
                    self.cursors[Focus::Companies.index()] = 0;
                    true
                }
                _ => false,
            },
            Focus::Companies => match controls.group.company(cursor) {
                Some(company) => {
                    controls.toggle(company);
                    true
                }
                None => false,
            },
            Focus::Period => match Period::iter().nth(cursor) {
                Some(period) if period != controls.period => {
                    controls.period = period;
                    true
                }
                _ => false,
            },
            Focus::Chart => match ChartStyle::iter().nth(cursor) {
                Some(chart) if chart != controls.chart => {
                    controls.chart = chart;
                    true
                }
                _ => false,
            },
        }
    }
}

fn option<'a>(marker: &'static str, label: String, highlighted: bool) -> Line<'a> {
    let style = if highlighted {
        styles::text_selected()
    } else {
        styles::text()
    };
    Line::from(Span::styled(format!("{marker} {label}"), style))
}

fn radio(checked: bool) -> &'static str {
    if checked {
        "(•)"
    } else {
        "( )"
    }
}

fn check(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

pub fn render(frame: &mut Frame, rect: Rect, sidebar: &Sidebar, controls: &Controls) {
    let heights = Focus::all()
        .into_iter()
        .map(|focus| Constraint::Length(focus.len(controls) as u16 + 2))
        .chain([Constraint::Min(0)])
        .collect::<Vec<_>>();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(heights)
        .split(rect);

    for (focus, chunk) in Focus::all().into_iter().zip(chunks.iter()) {
        let focused = sidebar.focus == focus;
        let at_cursor = |i: usize| focused && sidebar.cursor(focus) == i;
        let lines: Vec<Line> = match focus {
            Focus::Group => Group::iter()
                .enumerate()
                .map(|(i, g)| option(radio(g == controls.group), g.label(), at_cursor(i)))
                .collect(),
            Focus::Companies => controls
                .group
                .companies()
                .enumerate()
                .map(|(i, c)| {
                    option(
                        check(controls.is_selected(c)),
                        c.name.to_string(),
                        at_cursor(i),
                    )
                })
                .collect(),
            Focus::Period => Period::iter()
                .enumerate()
                .map(|(i, p)| option(radio(p == controls.period), p.label(), at_cursor(i)))
                .collect(),
            Focus::Chart => ChartStyle::iter()
                .enumerate()
                .map(|(i, c)| option(radio(c == controls.chart), c.label(), at_cursor(i)))
                .collect(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if focused {
                styles::border_focused()
            } else {
                styles::border()
            })
            .title(Span::styled(focus.title(), styles::title()));
        frame.render_widget(Paragraph::new(lines).block(block), *chunk);
    }
}
