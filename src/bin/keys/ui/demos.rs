//! Demo button row

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use saavy_keys::demos::{Demo, DemoPanel};

/// Render one button per wired demo and return where each landed
pub fn render_demos(frame: &mut Frame, area: Rect, panel: &DemoPanel) -> Vec<(Demo, Rect)> {
    let demos = panel.demos();
    if demos.is_empty() {
        let empty = Paragraph::new(" no demos wired")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Demos "));
        frame.render_widget(empty, area);
        return Vec::new();
    }

    let constraints = vec![Constraint::Ratio(1, demos.len() as u32); demos.len()];
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    demos
        .iter()
        .zip(cells.iter())
        .map(|(&demo, &cell)| {
            let button = Paragraph::new(format!("[{}] {}", demo.binding(), demo.label()))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(button, cell);
            (demo, cell)
        })
        .collect()
}
