use proxy_pdf::layout::GridPosition;
use proxy_pdf::*;

const EPS: f32 = 1e-3;

fn a4_layout(card: (f32, f32), margin: f32, gap: f32) -> LayoutGeometry {
    calculate_layout((210.0, 297.0), card, margin, gap, 3, 3)
}

#[test]
fn test_default_a4_grid_is_centered() {
    let layout = ProxyOptions::default().layout();

    assert_eq!(layout.card_width_mm, 63.0);
    assert_eq!(layout.card_height_mm, 88.0);
    assert_eq!(layout.grid_width_mm, 189.0);
    assert_eq!(layout.grid_height_mm, 264.0);
    assert_eq!(layout.origin_x_mm, 10.5);
    assert_eq!(layout.origin_y_mm, 16.5);
    assert!(!layout.width_shrunk);
    assert!(!layout.height_shrunk);
    assert_eq!(layout.slot_count(), 9);
}

#[test]
fn test_wide_cards_shrink_to_fit() {
    let layout = a4_layout((80.0, 88.0), 0.0, 0.0);

    assert!(layout.width_shrunk);
    assert!(!layout.height_shrunk);
    assert!((layout.card_width_mm - 70.0).abs() < EPS);
    assert!((layout.grid_width_mm - 210.0).abs() < EPS);
    assert!(layout.origin_x_mm.abs() < EPS);
}

#[test]
fn test_margin_and_gap_shrink() {
    // Printable width 190mm; 3 * 63 + 2 * 5 = 199mm does not fit
    let layout = a4_layout((63.0, 88.0), 10.0, 5.0);

    assert!(layout.width_shrunk);
    assert!((layout.card_width_mm - 60.0).abs() < EPS);
    assert!((layout.grid_width_mm - 190.0).abs() < EPS);
    assert!((layout.origin_x_mm - 10.0).abs() < EPS);

    // Printable height 277mm; 3 * 88 + 2 * 5 = 274mm fits
    assert!(!layout.height_shrunk);
    assert_eq!(layout.card_height_mm, 88.0);
    assert!((layout.origin_y_mm - 11.5).abs() < EPS);
}

#[test]
fn test_grid_never_overflows_printable_area() {
    let cases = [
        ((63.0, 88.0), 0.0, 0.0),
        ((63.0, 88.0), 10.0, 0.0),
        ((63.0, 88.0), 5.0, 3.0),
        ((100.0, 150.0), 0.0, 2.0),
        ((200.0, 10.0), 20.0, 10.0),
        ((10.0, 10.0), 0.0, 0.0),
    ];

    for (card, margin, gap) in cases {
        let layout = a4_layout(card, margin, gap);
        assert!(layout.origin_x_mm >= margin - EPS, "{:?}", layout);
        assert!(layout.origin_y_mm >= margin - EPS, "{:?}", layout);
        assert!(layout.grid_right_mm() <= 210.0 - margin + EPS, "{:?}", layout);
        assert!(layout.grid_bottom_mm() <= 297.0 - margin + EPS, "{:?}", layout);
        assert!(layout.card_width_mm <= card.0);
        assert!(layout.card_height_mm <= card.1);
    }
}

#[test]
fn test_landscape_swaps_page_dimensions() {
    let options = ProxyOptions {
        orientation: Orientation::Landscape,
        columns: 4,
        rows: 2,
        ..Default::default()
    };
    let layout = options.layout();

    assert_eq!(layout.page_width_mm, 297.0);
    assert_eq!(layout.page_height_mm, 210.0);
    // 4 * 63 = 252 fits in 297; 2 * 88 = 176 fits in 210
    assert!((layout.origin_x_mm - 22.5).abs() < EPS);
    assert!((layout.origin_y_mm - 17.0).abs() < EPS);
}

#[test]
fn test_slots_are_row_major() {
    let layout = ProxyOptions::default().layout();

    let first = layout.slot_rect(layout.grid_position(0));
    let fourth = layout.slot_rect(layout.grid_position(3));
    assert_eq!(layout.grid_position(3), GridPosition::new(1, 0));
    assert_eq!(first.x, fourth.x);
    assert!((fourth.y - first.y - 88.0).abs() < EPS);

    let last = layout.slot_rect(layout.grid_position(8));
    assert!((last.right() - layout.grid_right_mm()).abs() < EPS);
}

#[test]
fn test_cut_lines_count_and_order() {
    let layout = ProxyOptions::default().layout();
    let lines = calculate_cut_lines(&layout, 8.0);

    assert_eq!(lines.len(), 8);
    assert!(lines[..4]
        .iter()
        .all(|l| l.orientation == CutLineOrientation::Vertical));
    assert!(lines[4..]
        .iter()
        .all(|l| l.orientation == CutLineOrientation::Horizontal));

    let xs: Vec<f32> = lines[..4].iter().map(|l| l.position_mm).collect();
    assert_eq!(xs, vec![10.5, 73.5, 136.5, 199.5]);

    let ys: Vec<f32> = lines[4..].iter().map(|l| l.position_mm).collect();
    assert_eq!(ys, vec![16.5, 104.5, 192.5, 280.5]);

    // Extended 8mm past the grid on both ends
    assert_eq!(lines[0].start_mm, 8.5);
    assert_eq!(lines[0].end_mm, 288.5);
    assert_eq!(lines[4].start_mm, 2.5);
    assert_eq!(lines[4].end_mm, 207.5);
}

#[test]
fn test_cut_lines_clamped_to_page() {
    // Grid is 264mm tall on a 266mm page: it starts 1mm below the top edge
    let layout = calculate_layout((210.0, 266.0), (63.0, 88.0), 0.0, 0.0, 3, 3);
    assert_eq!(layout.origin_y_mm, 1.0);

    let lines = calculate_cut_lines(&layout, 8.0);
    for line in &lines {
        let limit = match line.orientation {
            CutLineOrientation::Vertical => layout.page_height_mm,
            CutLineOrientation::Horizontal => layout.page_width_mm,
        };
        assert!(line.start_mm >= 0.0);
        assert!(line.end_mm <= limit);
    }

    assert_eq!(lines[0].start_mm, 0.0);
    assert_eq!(lines[0].end_mm, 266.0);
}

#[test]
fn test_cut_lines_follow_gaps() {
    let layout = a4_layout((60.0, 80.0), 0.0, 3.0);
    let lines = calculate_cut_lines(&layout, 0.0);

    // Interior boundaries sit on the left edge of each column
    assert!((lines[1].position_mm - (layout.origin_x_mm + 63.0)).abs() < EPS);
    assert!((lines[3].position_mm - layout.grid_right_mm()).abs() < EPS);
    assert_eq!(lines[0].start_mm, layout.origin_y_mm);
    assert_eq!(lines[0].end_mm, layout.grid_bottom_mm());
}
