mod api;
mod app;
mod categorize;
mod charts;
mod dispatch;
mod due;
mod error;
mod hierarchy;
mod ledger;
mod model;
mod money;
mod planning;
mod settings;
mod state;
mod store;
mod views;

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("starting financeiro frontend");
    yew::Renderer::<app::App>::new().render();
}
