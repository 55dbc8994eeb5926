use yew::prelude::*;

use super::{current_settings, page_shell};
use crate::app::{alert, confirm, Controller};
use crate::dispatch::Command;
use crate::settings::{save_settings, AppSettings, CURRENCIES};

const CARD_CLASS: &str = "bg-card rounded-lg p-6 border border-border";
const FIELD_CLASS: &str = "w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary";

#[function_component(MaintenancePage)]
pub fn maintenance_page() -> Html {
    let settings = use_context::<UseStateHandle<AppSettings>>();
    let controller = use_context::<Controller>();
    let current = current_settings(&settings);
    let base_url = use_state(|| current.api_base_url.clone());
    let backup = use_state(|| None::<web_sys::File>);

    let apply = {
        let settings = settings.clone();
        move |next: AppSettings| {
            if let Some(settings) = settings.as_ref() {
                save_settings(&next);
                settings.set(next);
            }
        }
    };

    let on_currency_change = {
        let apply = apply.clone();
        let current = current.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
            apply(current.with_currency(&input.value()));
        })
    };
    let on_base_url_input = {
        let base_url = base_url.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            base_url.set(input.value());
        })
    };
    let on_base_url_save = {
        let base_url = base_url.clone();
        let current = current.clone();
        Callback::from(move |_: MouseEvent| {
            log::info!("API base URL set to {:?}", *base_url);
            apply(current.with_base_url(&base_url));
        })
    };

    let on_file = {
        let backup = backup.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            backup.set(input.files().and_then(|files| files.get(0)));
        })
    };
    let on_restore = {
        let controller = controller.clone();
        let backup = backup.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(controller) = controller.as_ref() else {
                return;
            };
            let Some(file) = (*backup).clone() else {
                alert("Selecione um arquivo de backup.");
                return;
            };
            if confirm("Restaurar este backup? Os dados atuais serão substituídos.") {
                controller.send(Command::Restore(file));
            }
        })
    };
    let on_reset = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(controller) = controller.as_ref() else {
                return;
            };
            if confirm("Apagar TODOS os lançamentos e configurações?")
                && confirm("Tem certeza? Esta ação não pode ser desfeita.")
            {
                controller.send(Command::ResetAll);
            }
        })
    };

    html! {
        { page_shell(
            "Manutenção",
            html! {},
            html! {
                <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                    <div class={CARD_CLASS}>
                        <h2 class="text-xl font-bold text-foreground mb-6">{"Preferências"}</h2>
                        <div class="space-y-4">
                            <div>
                                <label class="block text-sm font-medium text-foreground mb-2">{"Moeda"}</label>
                                <select onchange={on_currency_change} class={FIELD_CLASS}>
                                    { for CURRENCIES.iter().map(|(code, symbol)| html! {
                                        <option value={*code} selected={current.currency_code == *code}>{ format!("{} ({})", code, symbol) }</option>
                                    }) }
                                </select>
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-foreground mb-2">{"Endereço da API"}</label>
                                <div class="flex gap-2">
                                    <input type="url" placeholder="mesma origem" value={(*base_url).clone()} oninput={on_base_url_input} class={FIELD_CLASS} />
                                    <button type="button" onclick={on_base_url_save} class="px-4 py-2 rounded-lg bg-[#173E63] text-white text-sm font-bold">{"Salvar"}</button>
                                </div>
                                <p class="text-xs text-muted-foreground mt-2">{"Deixe vazio para usar o mesmo servidor da página."}</p>
                            </div>
                        </div>
                    </div>

                    <div class={CARD_CLASS}>
                        <h2 class="text-xl font-bold text-foreground mb-6">{"Backup"}</h2>
                        <div class="space-y-4">
                            <div>
                                <label class="block text-sm font-medium text-foreground mb-2">{"Restaurar backup"}</label>
                                <input type="file" accept=".db,.sqlite,.json" onchange={on_file} class="w-full text-sm" />
                                <button type="button" onclick={on_restore} class="mt-3 px-4 py-2 rounded-lg bg-[#173E63] text-white text-sm font-bold">{"Restaurar"}</button>
                            </div>
                            <div class="pt-4 border-t border-border">
                                <p class="text-sm text-muted-foreground mb-3">{"Remove todos os dados do servidor."}</p>
                                <button type="button" onclick={on_reset} class="px-4 py-2 rounded-lg bg-red-600 text-white text-sm font-bold">{"Zerar sistema"}</button>
                            </div>
                        </div>
                    </div>
                </div>
            }
        ) }
    }
}
