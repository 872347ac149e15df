use std::cmp::Ordering;

use crate::ir::Node;

use super::Rect;

/// Rejected layout inputs. The partitioner fails loudly instead of
/// producing a zero-size tiling.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("invalid layout input: canvas {width}x{height} has no area")]
    EmptyCanvas { width: f32, height: f32 },
    #[error("invalid layout input: no leaf has positive weight")]
    NoPositiveWeight,
    #[error("invalid layout input: leaf '{name}' has weight {value}, must be finite and non-negative")]
    BadLeafWeight { name: String, value: f64 },
}

/// A leaf paired with the rectangle the partition assigned to it.
#[derive(Debug, Clone)]
pub struct LeafRect<'a> {
    pub node: &'a Node,
    pub rect: Rect,
}

/// Tiles the `width` x `height` canvas with one rectangle per leaf,
/// areas proportional to leaf values.
///
/// Alternating-axis slice-and-dice: even depths split along x, odd depths
/// along y. Within each sibling group children are laid out in descending
/// weight order (stable for ties). `padding` is inserted as a gap between
/// adjacent siblings; the canvas boundary is never inset. The output is
/// bijective with the set of leaves; zero-weight leaves keep a degenerate
/// rectangle rather than being dropped.
pub fn partition(
    root: &Node,
    width: f32,
    height: f32,
    padding: f32,
) -> Result<Vec<LeafRect<'_>>, LayoutError> {
    if !(width > 0.0) || !(height > 0.0) {
        return Err(LayoutError::EmptyCanvas { width, height });
    }
    check_leaf_weights(root)?;
    if root.weight() <= 0.0 {
        return Err(LayoutError::NoPositiveWeight);
    }

    let mut out = Vec::with_capacity(root.leaf_count());
    slice(
        root,
        Rect::new(0.0, 0.0, width, height),
        0,
        padding.max(0.0),
        &mut out,
    );
    Ok(out)
}

fn check_leaf_weights(node: &Node) -> Result<(), LayoutError> {
    if node.is_leaf() {
        let value = node.value.unwrap_or(0.0);
        if !value.is_finite() || value < 0.0 {
            return Err(LayoutError::BadLeafWeight {
                name: node.name.clone(),
                value,
            });
        }
        return Ok(());
    }
    for child in &node.children {
        check_leaf_weights(child)?;
    }
    Ok(())
}

fn slice<'a>(node: &'a Node, rect: Rect, depth: usize, padding: f32, out: &mut Vec<LeafRect<'a>>) {
    if node.is_leaf() {
        out.push(LeafRect { node, rect });
        return;
    }

    let mut ordered: Vec<(f64, &Node)> = node
        .children
        .iter()
        .map(|child| (child.weight(), child))
        .collect();
    // sort_by is stable, so equal weights keep insertion order.
    ordered.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let total: f64 = ordered.iter().map(|(weight, _)| *weight).sum();
    let count = ordered.len();
    let horizontal = depth % 2 == 0;
    let span = if horizontal {
        rect.width()
    } else {
        rect.height()
    };

    // Gaps shrink when the parent is too small to hold them, so children
    // never escape the parent rectangle.
    let gap_total = padding * count.saturating_sub(1) as f32;
    let available = (span - gap_total).max(0.0);
    let gap = if count > 1 {
        (span - available) / (count - 1) as f32
    } else {
        0.0
    };

    let mut offset = 0.0f32;
    for (index, &(weight, child)) in ordered.iter().enumerate() {
        let ratio = if total > 0.0 {
            (weight / total) as f32
        } else {
            0.0
        };
        let child_span = available * ratio;
        let last = index + 1 == count;
        let child_rect = if horizontal {
            let x0 = (rect.x0 + offset).min(rect.x1);
            // The final sibling lands exactly on the parent edge, so
            // neighbors share edges and the tiling closes.
            let x1 = if last && total > 0.0 {
                rect.x1
            } else {
                (x0 + child_span).min(rect.x1)
            };
            Rect::new(x0, rect.y0, x1, rect.y1)
        } else {
            let y0 = (rect.y0 + offset).min(rect.y1);
            let y1 = if last && total > 0.0 {
                rect.y1
            } else {
                (y0 + child_span).min(rect.y1)
            };
            Rect::new(rect.x0, y0, rect.x1, y1)
        };
        offset += child_span + gap;

        slice(child, child_rect, depth + 1, padding, out);
    }
}
