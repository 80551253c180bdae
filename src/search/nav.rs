//! Navigation lifecycle interface.
//!
//! Client-side routers announce page transitions through framework-specific
//! events; components that must react to them (like the search engine
//! re-reading the `q` parameter after a transition) depend on this trait
//! instead, so the host router is the only code that knows the event names.

/// Callbacks the host environment's router invokes around a navigation.
///
/// All methods default to no-ops; implementors override what they need.
pub trait NavigationLifecycle {
    /// A navigation to `target_path` is starting.
    fn on_navigation_start(&mut self, target_path: &str) {
        let _ = target_path;
    }

    /// The navigation finished and the new URL is in place.
    fn on_navigation_complete(&mut self) {}

    /// The new page is interactive.
    fn on_page_ready(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl NavigationLifecycle for Recorder {
        fn on_navigation_start(&mut self, target_path: &str) {
            self.events.push(format!("start:{target_path}"));
        }

        fn on_navigation_complete(&mut self) {
            self.events.push("complete".into());
        }
    }

    #[test]
    fn test_default_methods_are_noops() {
        struct Silent;
        impl NavigationLifecycle for Silent {}

        let mut s = Silent;
        s.on_navigation_start("/search");
        s.on_navigation_complete();
        s.on_page_ready();
    }

    #[test]
    fn test_router_drives_callbacks_in_order() {
        let mut recorder = Recorder::default();

        recorder.on_navigation_start("/search?q=rust");
        recorder.on_navigation_complete();
        recorder.on_page_ready();

        assert_eq!(recorder.events, vec!["start:/search?q=rust", "complete"]);
    }
}
