//! Click delegation by intent.
//!
//! A single click listener sits on the page root. Each [`Intent`] is bound to
//! a selector and a handler; for a click, every binding whose selector
//! matches the target or one of its ancestors fires, in registration order,
//! with the nearest matching element. Bindings are independent: a like
//! button nested inside a song card triggers both intents.

use tracing::trace;

use crate::config::UiConfig;

/// A node that can look up its nearest ancestor matching a selector.
///
/// Implemented for DOM elements by the UI crate.
pub trait DelegationTarget: Sized {
    /// The node itself or its nearest ancestor matching `selector`.
    fn closest(&self, selector: &str) -> Option<Self>;
}

/// Kinds of delegated click interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Submit the enclosing filter form.
    ApplyFilters,
    /// Open a song preview or navigate to the song.
    ActivateSong,
    /// Toggle a like control.
    ToggleLike,
}

impl Intent {
    /// Every intent, in the order the router registers them.
    pub const ALL: [Self; 3] = [Self::ApplyFilters, Self::ActivateSong, Self::ToggleLike];

    /// Selector identifying elements carrying this intent.
    pub fn selector(self, config: &UiConfig) -> String {
        match self {
            Self::ApplyFilters => config.apply_filters_selector(),
            Self::ActivateSong => config.song_selector(),
            Self::ToggleLike => config.like_selector(),
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApplyFilters => write!(f, "apply-filters"),
            Self::ActivateSong => write!(f, "activate-song"),
            Self::ToggleLike => write!(f, "toggle-like"),
        }
    }
}

struct Binding<H> {
    intent: Intent,
    selector: String,
    handler: H,
}

/// A binding that matched a click target.
pub struct Matched<'a, N, H> {
    /// The intent that matched.
    pub intent: Intent,
    /// Nearest element carrying the intent.
    pub element: N,
    /// Handler registered for the intent.
    pub handler: &'a H,
}

/// Ordered intent bindings.
pub struct IntentRegistry<H> {
    bindings: Vec<Binding<H>>,
}

impl<H> Default for IntentRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> IntentRegistry<H> {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind a handler to an intent using the configured selector.
    pub fn register(&mut self, intent: Intent, config: &UiConfig, handler: H) -> &mut Self {
        self.register_selector(intent, intent.selector(config), handler)
    }

    /// Bind a handler to an intent with an explicit selector.
    pub fn register_selector(
        &mut self,
        intent: Intent,
        selector: impl Into<String>,
        handler: H,
    ) -> &mut Self {
        self.bindings.push(Binding {
            intent,
            selector: selector.into(),
            handler,
        });
        self
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Intents bound, in order.
    pub fn intents(&self) -> impl Iterator<Item = Intent> + '_ {
        self.bindings.iter().map(|b| b.intent)
    }

    /// Every binding matching `target`, in registration order.
    ///
    /// Matches are collected before any handler runs, so handlers that
    /// mutate the tree do not affect which intents fire for this click.
    pub fn resolve<N: DelegationTarget>(&self, target: &N) -> Vec<Matched<'_, N, H>> {
        self.bindings
            .iter()
            .filter_map(|binding| {
                target.closest(&binding.selector).map(|element| {
                    trace!(intent = %binding.intent, "Click matched intent");
                    Matched {
                        intent: binding.intent,
                        element,
                        handler: &binding.handler,
                    }
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    /// Minimal tree: each node matches a fixed set of selectors.
    struct Tree {
        parents: Vec<Option<usize>>,
        selectors: Vec<Vec<String>>,
    }

    #[derive(Clone, Copy)]
    struct Node<'t> {
        tree: &'t Tree,
        index: usize,
    }

    impl DelegationTarget for Node<'_> {
        fn closest(&self, selector: &str) -> Option<Self> {
            let mut current = Some(self.index);
            while let Some(index) = current {
                if self.tree.selectors[index].iter().any(|s| s == selector) {
                    return Some(Self {
                        tree: self.tree,
                        index,
                    });
                }
                current = self.tree.parents[index];
            }
            None
        }
    }

    /// body(0) > card[data-song-id](1) > like(2) > span(3); body > apply(4)
    fn page(config: &UiConfig) -> Tree {
        Tree {
            parents: vec![None, Some(0), Some(1), Some(2), Some(0)],
            selectors: vec![
                vec![],
                vec![config.song_selector()],
                vec![config.like_selector()],
                vec![],
                vec![config.apply_filters_selector()],
            ],
        }
    }

    fn registry(config: &UiConfig) -> IntentRegistry<&'static str> {
        let mut registry = IntentRegistry::new();
        registry
            .register(Intent::ApplyFilters, config, "apply")
            .register(Intent::ActivateSong, config, "song")
            .register(Intent::ToggleLike, config, "like");
        registry
    }

    #[test]
    fn test_registration_order() {
        let config = UiConfig::default();
        let registry = registry(&config);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.intents().collect::<Vec<_>>(), Intent::ALL.to_vec());
    }

    #[test]
    fn test_nested_target_matches_nearest_ancestor() {
        let config = UiConfig::default();
        let tree = page(&config);
        let registry = registry(&config);

        let matched = registry.resolve(&Node {
            tree: &tree,
            index: 3,
        });
        let found: Vec<_> = matched
            .iter()
            .map(|m| (m.intent, m.element.index, *m.handler))
            .collect();
        assert_eq!(
            found,
            vec![
                (Intent::ActivateSong, 1, "song"),
                (Intent::ToggleLike, 2, "like"),
            ]
        );
    }

    #[test]
    fn test_apply_control_matches_only_apply() {
        let config = UiConfig::default();
        let tree = page(&config);
        let registry = registry(&config);

        let matched = registry.resolve(&Node {
            tree: &tree,
            index: 4,
        });
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].intent, Intent::ApplyFilters);
    }

    #[test]
    fn test_unrelated_target_matches_nothing() {
        let config = UiConfig::default();
        let tree = page(&config);
        let registry = registry(&config);

        assert!(
            registry
                .resolve(&Node {
                    tree: &tree,
                    index: 0
                })
                .is_empty()
        );
    }

    #[test]
    fn test_intent_display() {
        assert_eq!(Intent::ActivateSong.to_string(), "activate-song");
    }
}
