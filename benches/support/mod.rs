//! Shared helpers for benchmarks

use tabsheet::config::{BehaviorConfig, SheetConfig};
use tabsheet::model::AppModel;

/// A demo model with a deep view tree: `depth` nested plain views sit in
/// front of the list, so the scrolling-child search has to walk them all
#[allow(dead_code)]
pub fn make_model(depth: usize) -> AppModel {
    let config = SheetConfig {
        behavior: BehaviorConfig {
            peek_height: 200,
            anchor_point: 600,
            ..BehaviorConfig::default()
        },
        ..SheetConfig::default()
    };
    let mut model = AppModel::new(config);
    let mut parent = model.panel;
    for _ in 0..depth {
        parent = model
            .layout
            .add_descendant(parent, tabsheet::host::View::new(10, 10));
    }
    model.layout.layout();
    model
}
