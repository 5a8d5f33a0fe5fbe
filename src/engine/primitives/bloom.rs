use crate::types::{Color, Layer, NodeKind, VisualNode};

/// Blur radius (fraction of font size) and opacity of each glow copy,
/// widest first.
const GLOW_LAYERS: [(f64, f64); 3] = [(0.30, 0.55), (0.15, 0.40), (0.06, 0.30)];

/// Glow by stacking three blurred, tinted copies beneath a sharp copy.
///
/// Static at any given frame: whatever wraps it supplies the animation.
#[derive(Debug, Clone, Copy)]
pub struct BloomText {
    pub glow: Color,
    /// Reference size the blur radii scale with.
    pub size: f64,
}

impl BloomText {
    pub fn new(glow: Color, size: f64) -> Self {
        BloomText { glow, size }
    }

    pub fn render(&self, content: VisualNode) -> VisualNode {
        let mut layers: Vec<VisualNode> = GLOW_LAYERS
            .iter()
            .map(|&(blur, opacity)| {
                let mut copy = content.clone();
                tint(&mut copy, self.glow);
                VisualNode::stack(vec![copy]).with_layer(Layer {
                    opacity,
                    blur: self.size * blur,
                    ..Layer::default()
                })
            })
            .collect();
        layers.push(content);
        VisualNode::stack(layers)
    }
}

fn tint(node: &mut VisualNode, color: Color) {
    match &mut node.kind {
        NodeKind::Text(text) => text.color = color,
        NodeKind::Group { children, .. } => {
            for child in children {
                tint(child, color);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::theme::Theme;

    #[test]
    fn four_copies_sharp_on_top() {
        let theme = Theme::default();
        let text = VisualNode::text(theme.display("Vendé", 120.0, theme.text));
        let bloom = BloomText::new(theme.gold, 120.0).render(text.clone());
        let copies = bloom.children();
        assert_eq!(copies.len(), 4);
        assert_eq!(copies[3], text);

        let blurs: Vec<f64> = copies[..3].iter().map(|c| c.layer.blur).collect();
        let alphas: Vec<f64> = copies[..3].iter().map(|c| c.layer.opacity).collect();
        assert!(blurs.windows(2).all(|w| w[0] > w[1]));
        assert!(alphas.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn glow_copies_take_the_glow_colour() {
        let theme = Theme::default();
        let text = VisualNode::text(theme.display("Hoy", 80.0, theme.text));
        let bloom = BloomText::new(theme.gold, 80.0).render(text);
        match &bloom.children()[0].children()[0].kind {
            NodeKind::Text(t) => assert_eq!(t.color, theme.gold),
            other => panic!("unexpected {other:?}"),
        }
    }
}
