use ratatui::layout::Rect;

pub fn clamp_day(day: u32, days_in_month: u32) -> u32 {
    day.clamp(1, days_in_month.max(1))
}

/// Moves the cursor by `delta` days, staying inside the month.
pub fn shift_day(day: u32, delta: i32, days_in_month: u32) -> u32 {
    let target = i64::from(day) + i64::from(delta);
    let last = i64::from(days_in_month.max(1));
    target.clamp(1, last) as u32
}

pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

pub fn centered_column(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
}
