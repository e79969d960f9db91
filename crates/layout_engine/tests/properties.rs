//! Property tests for box layout measurement and stability

use layout_engine::{BoxLayout, LayoutTree};
use proptest::prelude::*;
use widget_tree::{Point, Size, Widget, WidgetId};

fn build(
    layout: BoxLayout,
    sizes: &[(u32, u32)],
) -> (LayoutTree, WidgetId, Vec<WidgetId>) {
    let mut tree = LayoutTree::new();
    let root = tree.add_layout(Widget::new(), layout).unwrap();
    let kids: Vec<WidgetId> = sizes
        .iter()
        .map(|&(w, h)| tree.add_widget(Widget::with_size(w as f64, h as f64)).unwrap())
        .collect();
    for kid in &kids {
        tree.add_child(root, *kid).unwrap();
    }
    (tree, root, kids)
}

fn positions(tree: &LayoutTree, kids: &[WidgetId]) -> Vec<Point> {
    kids.iter().map(|k| tree.widget(*k).unwrap().pos()).collect()
}

proptest! {
    #[test]
    fn horizontal_content_is_sum_plus_spacing(
        sizes in prop::collection::vec((1u32..100, 1u32..100), 1..12),
        spacing in 0u32..10,
        padding in 0u32..10,
    ) {
        let layout = BoxLayout::horizontal().spacing(spacing as f64).padding(padding as f64);
        let (tree, root, _) = build(layout, &sizes);

        let n = sizes.len() as f64;
        let sum: f64 = sizes.iter().map(|&(w, _)| w as f64).sum();
        let max_h = sizes.iter().map(|&(_, h)| h).max().unwrap() as f64;
        let pad = padding as f64 * 2.0;

        prop_assert_eq!(
            tree.content_size(root).unwrap(),
            Size::new(pad + sum + spacing as f64 * (n - 1.0), pad + max_h)
        );
    }

    #[test]
    fn vertical_content_is_sum_plus_spacing(
        sizes in prop::collection::vec((1u32..100, 1u32..100), 1..12),
        spacing in 0u32..10,
    ) {
        let layout = BoxLayout::vertical().spacing(spacing as f64);
        let (tree, root, _) = build(layout, &sizes);

        let n = sizes.len() as f64;
        let sum: f64 = sizes.iter().map(|&(_, h)| h as f64).sum();
        let max_w = sizes.iter().map(|&(w, _)| w).max().unwrap() as f64;

        prop_assert_eq!(
            tree.content_size(root).unwrap(),
            Size::new(max_w, sum + spacing as f64 * (n - 1.0))
        );
    }

    #[test]
    fn relayout_is_idempotent(
        sizes in prop::collection::vec((0u32..50, 0u32..50), 0..8),
        spacing in 0u32..5,
        padding in 0u32..5,
        vertical in any::<bool>(),
        uniform_width in any::<bool>(),
        invert_x in any::<bool>(),
        invert_y in any::<bool>(),
    ) {
        let base = if vertical { BoxLayout::vertical() } else { BoxLayout::horizontal() };
        let layout = base
            .spacing(spacing as f64)
            .padding(padding as f64)
            .uniform_width(uniform_width)
            .invert_x(invert_x)
            .invert_y(invert_y);
        let (mut tree, root, kids) = build(layout, &sizes);

        let first = (tree.content_size(root), positions(&tree, &kids));
        tree.do_layout(root).unwrap();
        let second = (tree.content_size(root), positions(&tree, &kids));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn uniform_width_equalizes_children(
        sizes in prop::collection::vec((1u32..100, 1u32..100), 1..10),
    ) {
        let max_w = sizes.iter().map(|&(w, _)| w).max().unwrap() as f64;
        let (tree, _, kids) = build(BoxLayout::vertical().uniform_width(true), &sizes);

        for kid in &kids {
            prop_assert_eq!(tree.widget(*kid).unwrap().width(), max_w);
        }
    }
}

#[test]
fn empty_layout_has_no_spacing_term() {
    let (tree, root, _) = build(BoxLayout::horizontal().spacing(7.0).padding(2.0), &[]);
    assert_eq!(tree.content_size(root), Some(Size::new(4.0, 4.0)));
}
