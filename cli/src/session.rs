//! Interactive loop: redraw on every state change, read commands from input.

use std::sync::Arc;

use biblioteca_core::{LibrosController, Transport, ViewState};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Drive `controller` from line commands until `q` or end of input.
///
/// `r` or an empty line reloads. When input ends while a fetch is in flight,
/// the loop keeps drawing until that fetch settles.
pub async fn interactive<T, R>(
    controller: &Arc<LibrosController<T>>,
    input: R,
    mut draw: impl FnMut(&ViewState),
) -> anyhow::Result<()>
where
    T: Transport + 'static,
    R: AsyncBufRead + Unpin,
{
    let mut rx = controller.subscribe();
    let mut lines = input.lines();
    let mut input_open = true;
    draw(&rx.borrow_and_update());

    loop {
        tokio::select! {
            changed = rx.changed() => {
                changed?;
                let state = rx.borrow_and_update().clone();
                draw(&state);
                if !input_open && !state.is_loading {
                    break;
                }
            }
            line = lines.next_line(), if input_open => {
                match line?.as_deref().map(str::trim) {
                    None => {
                        input_open = false;
                        if !rx.borrow().is_loading {
                            if rx.has_changed()? {
                                draw(&rx.borrow_and_update());
                            }
                            break;
                        }
                    }
                    Some("q") => break,
                    Some("" | "r") => {
                        if controller.trigger().is_none() {
                            eprintln!("already loading");
                        }
                    }
                    Some(other) => {
                        eprintln!("unknown command {other:?}, use r to reload or q to quit")
                    }
                }
            }
        }
    }
    Ok(())
}
