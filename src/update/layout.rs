//! Coordinator layout message handlers

use crate::commands::Cmd;
use crate::messages::LayoutMsg;
use crate::model::AppModel;

pub fn update_layout(model: &mut AppModel, msg: LayoutMsg) -> Option<Cmd> {
    match msg {
        LayoutMsg::Resize { width, height } => {
            if width <= 0 || height <= 0 {
                tracing::warn!(target: "layout", width, height, "ignoring degenerate resize");
                return None;
            }
            model.layout.resize(width, height);
            // The sheet fills the coordinator; its list shrinks by the header
            if let Some(panel) = model.layout.tree.get_mut(model.panel) {
                panel.width = width;
                panel.height = height;
            }
            model.layout.layout();
            Some(Cmd::Redraw)
        }

        LayoutMsg::Relayout => {
            model.layout.layout();
            Some(Cmd::Redraw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::PanelState;

    #[test]
    fn test_resize_relays_out_at_state_offset() {
        let mut model = AppModel::demo();
        update_layout(
            &mut model,
            LayoutMsg::Resize {
                width: 1080,
                height: 1200,
            },
        );
        let behavior = model.behavior().unwrap();
        assert_eq!(behavior.geometry().parent_height, 1200);
        assert_eq!(behavior.state(), PanelState::AnchorPoint);
        assert_eq!(model.panel_top(), Some(behavior.geometry().anchor_point));
    }

    #[test]
    fn test_degenerate_resize_ignored() {
        let mut model = AppModel::demo();
        assert_eq!(
            update_layout(&mut model, LayoutMsg::Resize { width: 0, height: 10 }),
            None
        );
        assert_eq!(model.layout.height, crate::model::DEMO_HEIGHT);
    }
}
