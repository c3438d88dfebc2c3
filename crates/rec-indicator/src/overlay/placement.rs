use serde::{Deserialize, Serialize};
use tao::dpi::{PhysicalPosition, PhysicalSize};

/// Screen corner the overlay is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    #[default]
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

/// Outer position of an overlay of `icon_size` in `corner` of a monitor,
/// `margin` pixels in from both edges.
///
/// Never places the overlay left of or above the monitor origin, even when
/// the icon is larger than the monitor.
pub fn place(
    monitor_origin: PhysicalPosition<i32>,
    monitor_size: PhysicalSize<u32>,
    icon_size: PhysicalSize<u32>,
    corner: Corner,
    margin: u32,
) -> PhysicalPosition<i32> {
    let margin = i64::from(margin);
    let (origin_x, origin_y) = (i64::from(monitor_origin.x), i64::from(monitor_origin.y));

    let left = origin_x + margin;
    let top = origin_y + margin;
    let right = origin_x + i64::from(monitor_size.width) - i64::from(icon_size.width) - margin;
    let bottom = origin_y + i64::from(monitor_size.height) - i64::from(icon_size.height) - margin;

    let (x, y) = match corner {
        Corner::TopLeft => (left, top),
        Corner::TopRight => (right, top),
        Corner::BottomLeft => (left, bottom),
        Corner::BottomRight => (right, bottom),
    };

    PhysicalPosition::new(saturate(x.max(origin_x)), saturate(y.max(origin_y)))
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
