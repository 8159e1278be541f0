pub mod error;
pub mod hooks;
pub mod model;

pub use error::{Error, Fault};
pub use hooks::Hook;
pub use model::{Exec, State};

/// Run until the machine stops or `tmax` steps have been executed.
/// Returns the number of executed steps.
pub fn run(state: &mut State, hooks: &mut [&mut dyn Hook], tmax: Option<u64>) -> Result<u64, Error> {
    for hook in hooks.iter_mut() {
        hook.init(state)?;
    }

    let mut time = 0;
    while !state.is_terminated() && tmax.map_or(true, |t| time < t) {
        let exec = state.exec()?;
        for hook in hooks.iter_mut() {
            hook.exec(time, &exec, state)?;
        }
        time += 1;
    }

    for hook in hooks.iter_mut() {
        hook.finish(state)?;
    }
    Ok(time)
}
