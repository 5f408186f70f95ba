use std::rc::Rc;

use eframe::NativeOptions;

use bistro::{
    logger,
    menu::Catalog,
    schedule::{FrameScheduler, RepaintScheduler},
    session,
    state::{AppState, PersistState},
    store, EnvConfig, SETTINGS_KEY,
};

fn main() -> anyhow::Result<()> {
    simple_env_load::load_env_from([".dev.env"]);

    let logs = logger::init_logger()?;

    let mut state = PersistState {
        catalog: Catalog::builtin()?,
        table_arg: session::table_from_args(std::env::args().skip(1)),
        ..Default::default()
    };
    EnvConfig::load_from_env()?.apply(&mut state.settings);

    log::info!(
        "{} is open with {} dishes",
        state.settings.name,
        state.catalog.items().len()
    );

    eframe::run_native(
        "Bistro",
        NativeOptions::default(),
        Box::new(move |cc| {
            if let Some(storage) = cc.storage {
                state.store = store::load_from(storage, SETTINGS_KEY);
            }

            let scheduler: Rc<dyn FrameScheduler> =
                Rc::new(RepaintScheduler::new(cc.egui_ctx.clone()));
            let state = AppState::new(state, scheduler);
            Box::new(bistro::App::new(cc.egui_ctx.clone(), logs, state))
        }),
    );

    Ok(())
}
