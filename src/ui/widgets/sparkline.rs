//! Temperature sparkline widget for the hourly strip

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Block characters for different temperatures (8 levels)
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A sparkline of temperatures, one column per value
///
/// Values are scaled between the lowest and highest present value; missing
/// values leave their column blank.
pub struct TemperatureSparkline<'a> {
    /// Temperature for each time slot
    temperatures: &'a [Option<f64>],
    /// Columns per value
    column_width: u16,
    /// Current position marker (index into temperatures)
    current_position: Option<usize>,
    /// Style for the sparkline
    style: Style,
    /// Style for the current position marker
    marker_style: Style,
}

impl<'a> TemperatureSparkline<'a> {
    pub fn new(temperatures: &'a [Option<f64>]) -> Self {
        Self {
            temperatures,
            column_width: 1,
            current_position: None,
            style: Style::default().fg(Color::Cyan),
            marker_style: Style::default().fg(Color::Yellow),
        }
    }

    pub fn column_width(mut self, width: u16) -> Self {
        self.column_width = width.max(1);
        self
    }

    pub fn current_position(mut self, pos: usize) -> Self {
        self.current_position = Some(pos);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Lowest and highest present value
    fn range(&self) -> Option<(f64, f64)> {
        self.temperatures
            .iter()
            .flatten()
            .filter(|t| t.is_finite())
            .fold(None, |acc, &t| match acc {
                None => Some((t, t)),
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            })
    }

    fn temperature_to_block(&self, temperature: f64, (lo, hi): (f64, f64)) -> char {
        let span = hi - lo;
        let normalized = if span > 0.0 {
            ((temperature - lo) / span).clamp(0.0, 1.0)
        } else {
            0.5
        };
        let index = ((normalized * 7.0).round() as usize).min(7);
        BLOCKS[index]
    }
}

impl<'a> Widget for TemperatureSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let Some(range) = self.range() else {
            return;
        };

        let columns = (area.width / self.column_width) as usize;

        for (i, temperature) in self.temperatures.iter().take(columns).enumerate() {
            let Some(temperature) = temperature.filter(|t| t.is_finite()) else {
                continue;
            };
            let block = self.temperature_to_block(temperature, range);
            let style = if self.current_position == Some(i) {
                self.marker_style
            } else {
                self.style
            };

            let start = area.x + i as u16 * self.column_width;
            // Leave a gap column between values when there is room
            let filled = if self.column_width > 2 {
                self.column_width - 1
            } else {
                self.column_width
            };
            for dx in 0..filled {
                if let Some(cell) = buf.cell_mut((start + dx, area.y)) {
                    cell.set_char(block).set_style(style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_minimum_and_maximum() {
        let sparkline = TemperatureSparkline::new(&[]);
        assert_eq!(sparkline.temperature_to_block(-3.0, (-3.0, 12.0)), '▁');
        assert_eq!(sparkline.temperature_to_block(12.0, (-3.0, 12.0)), '█');
    }

    #[test]
    fn test_block_flat_series_is_mid() {
        let sparkline = TemperatureSparkline::new(&[]);
        let block = sparkline.temperature_to_block(20.0, (20.0, 20.0));
        assert!(BLOCKS.contains(&block));
        assert_ne!(block, '▁');
        assert_ne!(block, '█');
    }

    #[test]
    fn test_range_skips_missing_values() {
        let temps = [Some(4.0), None, Some(-2.0), Some(9.5)];
        let sparkline = TemperatureSparkline::new(&temps);
        assert_eq!(sparkline.range(), Some((-2.0, 9.5)));

        let empty = [None, None];
        assert_eq!(TemperatureSparkline::new(&empty).range(), None);
    }

    #[test]
    fn test_render_leaves_gaps_for_missing_values() {
        let temps = [Some(1.0), None, Some(5.0)];
        let area = Rect::new(0, 0, 3, 1);
        let mut buf = Buffer::empty(area);

        TemperatureSparkline::new(&temps).current_position(0).render(area, &mut buf);

        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "▁");
        assert_eq!(buf.cell((1, 0)).unwrap().symbol(), " ");
        assert_eq!(buf.cell((2, 0)).unwrap().symbol(), "█");
        assert_eq!(buf.cell((0, 0)).unwrap().fg, Color::Yellow);
        assert_eq!(buf.cell((2, 0)).unwrap().fg, Color::Cyan);
    }

    #[test]
    fn test_render_wide_columns() {
        let temps = [Some(0.0), Some(10.0)];
        let area = Rect::new(0, 0, 8, 1);
        let mut buf = Buffer::empty(area);

        TemperatureSparkline::new(&temps)
            .column_width(4)
            .style(Style::default().fg(Color::Blue))
            .render(area, &mut buf);

        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "▁");
        assert_eq!(buf.cell((2, 0)).unwrap().symbol(), "▁");
        assert_eq!(buf.cell((3, 0)).unwrap().symbol(), " ");
        assert_eq!(buf.cell((4, 0)).unwrap().symbol(), "█");
        assert_eq!(buf.cell((4, 0)).unwrap().fg, Color::Blue);
    }
}
