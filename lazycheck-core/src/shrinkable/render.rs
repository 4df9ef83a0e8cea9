//! Depth-bounded rendering of lazy shrink trees for debugging.

use super::Shrinkable;

/// How many candidates to show per level before eliding the rest.
const RENDER_WIDTH: usize = 8;

impl<T> Shrinkable<T>
where
    T: std::fmt::Display + 'static,
{
    /// Render the tree as an outline, expanding at most `max_depth` levels
    /// of shrink candidates and at most [`RENDER_WIDTH`] candidates per
    /// level. Both bounds matter: the tree is lazy and may be unbounded in
    /// depth and in width, so rendering must not force it fully.
    pub fn render(&self, max_depth: usize) -> String {
        let mut result = String::new();
        self.render_recursive(&mut result, "", true, max_depth);
        result
    }

    fn render_recursive(&self, result: &mut String, prefix: &str, is_last: bool, depth: usize) {
        result.push_str(prefix);
        if is_last {
            result.push_str("└── ");
        } else {
            result.push_str("├── ");
        }
        match self.value() {
            Ok(value) => result.push_str(&format!("{value}\n")),
            Err(error) => result.push_str(&format!("<{error}>\n")),
        }

        if depth == 0 {
            return;
        }

        let child_prefix = if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };

        let mut children: Vec<Shrinkable<T>> = self.shrinks().take(RENDER_WIDTH + 1).collect();
        let elided = children.len() > RENDER_WIDTH;
        if elided {
            children.truncate(RENDER_WIDTH);
        }
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            let is_last = !elided && i == count - 1;
            child.render_recursive(result, &child_prefix, is_last, depth - 1);
        }
        if elided {
            result.push_str(&child_prefix);
            result.push_str("└── ...\n");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::Seq;

    #[test]
    fn renders_bounded_outline() {
        let tree = Shrinkable::with(
            || Ok(4),
            || {
                Seq::from_vec(vec![
                    Shrinkable::with(|| Ok(2), || Seq::singleton(Shrinkable::just(1))),
                    Shrinkable::just(0),
                ])
            },
        );

        let rendered = tree.render(2);
        assert!(rendered.contains("└── 4"));
        assert!(rendered.contains("├── 2"));
        assert!(rendered.contains("└── 1"));
        assert!(rendered.contains("└── 0"));
    }

    #[test]
    fn width_is_bounded_for_infinite_candidate_sequences() {
        let tree = Shrinkable::with(
            || Ok(0i64),
            || {
                Seq::unfold(1i64, |n| {
                    let value = *n;
                    *n += 1;
                    Some(value)
                })
                .map(Shrinkable::just)
            },
        );

        // Root, RENDER_WIDTH candidates, and one elision marker.
        let rendered = tree.render(1);
        assert_eq!(rendered.lines().count(), RENDER_WIDTH + 2);
        assert!(rendered.ends_with("└── ...\n"));
    }

    #[test]
    fn depth_zero_renders_only_the_root() {
        let tree = Shrinkable::with(|| Ok(7), || Seq::singleton(Shrinkable::just(3)));
        assert_eq!(tree.render(0), "└── 7\n");
    }
}
