use yew::prelude::*;

use super::{
    current_settings, dialog_panel, icon_plus, icon_trash, page_shell, parse_id, select_options,
    StatCard, StatIcon,
};
use crate::app::Controller;
use crate::charts::ChartView;
use crate::dispatch::{Command, InvoicePaymentForm, TransactionForm};
use crate::hierarchy::{account_options, category_options, subtype_options, type_options};
use crate::ledger::ledger_view;
use crate::model::Direction;
use crate::settings::AppSettings;
use crate::state::{Dialog, YearMonth};

#[function_component(TransactionsPage)]
pub fn transactions_page() -> Html {
    let settings = use_context::<UseStateHandle<AppSettings>>();
    let controller = use_context::<Controller>();
    let Some(controller) = controller else {
        return html! {};
    };
    let settings = current_settings(&settings);

    let (view, month, account, accounts, dialog) = {
        let state = controller.state.borrow();
        (
            ledger_view(&state, &settings),
            state.filters.month,
            state.filters.account,
            account_options(&state.snapshot, None),
            state.dialog,
        )
    };

    let on_month = {
        let controller = controller.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            match input.value().parse::<YearMonth>() {
                Ok(month) => controller.send(Command::SetMonth(month)),
                Err(err) => log::warn!("{}", err),
            }
        })
    };
    let on_account = {
        let controller = controller.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
            controller.send(Command::SetAccountFilter(parse_id(&input.value())));
        })
    };
    let open = |dialog: Dialog| {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| controller.send(Command::OpenDialog(dialog)))
    };

    let summary = view.summary;
    let symbol = settings.currency_symbol.clone();

    html! {
        { page_shell(
            "Lançamentos",
            html! {
                <div class="flex items-center gap-3">
                    <button type="button" onclick={open(Dialog::InvoicePayment)} class="px-4 py-2 rounded-lg border border-border text-sm font-medium">{"💳 Pagar fatura"}</button>
                    <button type="button" onclick={open(Dialog::NewTransaction)} class="flex items-center gap-2 px-4 py-2 rounded-lg bg-[#173E63] text-white text-sm font-bold">
                        { icon_plus() }
                        <span>{"Novo lançamento"}</span>
                    </button>
                </div>
            },
            html! {
                <>
                    <div class="flex flex-wrap items-end gap-4">
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Mês"}</label>
                            <input type="month" value={month.to_string()} onchange={on_month} class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px] text-[#173E63] border-none" />
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Conta"}</label>
                            <select onchange={on_account} class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px] text-[#173E63] border-none">
                                <option value="" selected={account.is_none()}>{"Todas as contas"}</option>
                                { select_options(&accounts, account) }
                            </select>
                        </div>
                    </div>

                    <div class="grid grid-cols-1 md:grid-cols-5 gap-4">
                        <StatCard title="ENTRADAS" amount={summary.inflow} icon={StatIcon::UpRight} currency_symbol={symbol.clone()} />
                        <StatCard title="SAÍDAS" amount={summary.outflow} icon={StatIcon::DownRight} currency_symbol={symbol.clone()} />
                        <StatCard title="DISPONÍVEL" amount={summary.available} icon={StatIcon::Wallet} currency_symbol={symbol.clone()} />
                        <StatCard title="FATURA CARTÕES" amount={summary.card_balance} icon={StatIcon::CreditCard} currency_symbol={symbol.clone()} />
                        <StatCard title="SALDO LÍQUIDO" amount={summary.net()} icon={StatIcon::Scale} currency_symbol={symbol} />
                    </div>

                    <div class="bg-card rounded-[10px] border border-border overflow-x-auto">
                        <table class="w-full text-sm">
                            <thead class="text-left text-[11px] uppercase tracking-wider text-muted-foreground border-b border-border">
                                <tr>
                                    <th class="px-3 py-2">{"✔"}</th>
                                    <th class="px-3 py-2">{"Data"}</th>
                                    <th class="px-3 py-2">{"Conta"}</th>
                                    <th class="px-3 py-2">{"Descrição"}</th>
                                    <th class="px-3 py-2">{"Tipo"}</th>
                                    <th class="px-3 py-2">{"Subtipo"}</th>
                                    <th class="px-3 py-2">{"Categoria"}</th>
                                    <th class="px-3 py-2 text-right">{"Valor"}</th>
                                    <th class="px-3 py-2"></th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-border">
                                { for view.rows.iter().map(|row| {
                                    let id = row.id;
                                    let on_toggle = {
                                        let controller = controller.clone();
                                        Callback::from(move |_: Event| controller.send(Command::ToggleSettled(id)))
                                    };
                                    let on_delete = {
                                        let controller = controller.clone();
                                        Callback::from(move |_: MouseEvent| controller.send(Command::AskDeleteTransaction(id)))
                                    };
                                    let amount_class = match row.direction {
                                        Direction::Inflow => "px-3 py-2 text-right font-bold text-green-700",
                                        Direction::Outflow => "px-3 py-2 text-right font-bold text-red-600",
                                    };
                                    let row_class = if row.settled { "" } else { "opacity-60" };
                                    html! {
                                        <tr class={row_class}>
                                            <td class="px-3 py-2"><input type="checkbox" checked={row.settled} onchange={on_toggle} /></td>
                                            <td class="px-3 py-2 whitespace-nowrap">{ row.date.clone() }</td>
                                            <td class="px-3 py-2 whitespace-nowrap">{ format!("{} {}", row.account_icon, row.account_label) }</td>
                                            <td class="px-3 py-2">
                                                { row.description.clone() }
                                                {
                                                    match &row.attachment_url {
                                                        Some(url) => html! { <a href={url.clone()} target="_blank" class="ml-2" title="Comprovante">{"📎"}</a> },
                                                        None => html! {},
                                                    }
                                                }
                                            </td>
                                            <td class="px-3 py-2">{ row.type_name.clone() }</td>
                                            <td class="px-3 py-2">{ row.subtype.clone() }</td>
                                            <td class="px-3 py-2">{ row.category.clone() }</td>
                                            <td class={amount_class}>{ row.amount.clone() }</td>
                                            <td class="px-3 py-2">
                                                <button type="button" onclick={on_delete} class="text-red-600" aria-label="Apagar">{ icon_trash() }</button>
                                            </td>
                                        </tr>
                                    }
                                }) }
                            </tbody>
                        </table>
                        {
                            if view.rows.is_empty() {
                                html! { <p class="px-4 py-6 text-center text-muted-foreground text-sm">{"Nenhum lançamento neste mês."}</p> }
                            } else {
                                html! {}
                            }
                        }
                    </div>

                    <div class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-3 gap-4">
                        { for view.charts.iter().map(|spec| html! { <ChartView spec={spec.clone()} currency_code={settings.currency_code.clone()} /> }) }
                    </div>

                    {
                        match dialog {
                            Some(Dialog::NewTransaction) => html! { <TransactionDialog /> },
                            Some(Dialog::InvoicePayment) => html! { <InvoicePaymentDialog /> },
                            _ => html! {},
                        }
                    }
                </>
            }
        ) }
    }
}

const FIELD_CLASS: &str = "w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px] text-[#173E63] border-none";
const LABEL_CLASS: &str = "text-[12px] font-bold text-muted-foreground";

fn input_setter(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |e: InputEvent| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        handle.set(input.value());
    })
}

#[function_component(TransactionDialog)]
fn transaction_dialog() -> Html {
    let controller = use_context::<Controller>();
    let today = controller
        .as_ref()
        .map(|c| c.state.borrow().today.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let form = use_state(move || TransactionForm {
        date: today,
        installments: "1".to_string(),
        ..TransactionForm::default()
    });
    let Some(controller) = controller else {
        return html! {};
    };

    let (types, subtypes, categories, accounts) = {
        let state = controller.state.borrow();
        let snapshot = &state.snapshot;
        (
            type_options(snapshot),
            subtype_options(snapshot, form.type_id),
            category_options(snapshot, form.subtype_id),
            account_options(snapshot, None),
        )
    };

    let edit = |apply: fn(&mut TransactionForm, String)| {
        let form = form.clone();
        move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        }
    };
    let on_text = |apply: fn(&mut TransactionForm, String)| {
        let edit = edit(apply);
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            edit(input.value());
        })
    };
    let on_select = |apply: fn(&mut TransactionForm, String)| {
        let edit = edit(apply);
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
            edit(input.value());
        })
    };
    let on_file = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.attachment = input.files().and_then(|files| files.get(0));
            form.set(next);
        })
    };
    let on_close = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| controller.send(Command::CloseDialog))
    };
    let on_save = {
        let controller = controller.clone();
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            controller.send(Command::SubmitTransaction((*form).clone()))
        })
    };

    dialog_panel(
        "Novo lançamento",
        on_close,
        html! {
            <div class="grid grid-cols-2 gap-3">
                <div class="space-y-1">
                    <label class={LABEL_CLASS}>{"Data"}</label>
                    <input type="date" value={form.date.clone()} oninput={on_text(|f, v| f.date = v)} class={FIELD_CLASS} />
                </div>
                <div class="space-y-1">
                    <label class={LABEL_CLASS}>{"Valor"}</label>
                    <input type="text" inputmode="decimal" placeholder="0,00" value={form.amount.clone()} oninput={on_text(|f, v| f.amount = v)} class={FIELD_CLASS} />
                </div>
                <div class="space-y-1 col-span-2">
                    <label class={LABEL_CLASS}>{"Descrição"}</label>
                    <input type="text" value={form.description.clone()} oninput={on_text(|f, v| f.description = v)} class={FIELD_CLASS} />
                </div>
                <div class="space-y-1">
                    <label class={LABEL_CLASS}>{"Tipo"}</label>
                    <select onchange={on_select(|f, v| {
                        f.type_id = parse_id(&v);
                        f.subtype_id = None;
                        f.category_id = None;
                    })} class={FIELD_CLASS}>
                        <option value="" selected={form.type_id.is_none()}>{"Selecione..."}</option>
                        { select_options(&types, form.type_id) }
                    </select>
                </div>
                <div class="space-y-1">
                    <label class={LABEL_CLASS}>{"Subtipo"}</label>
                    <select onchange={on_select(|f, v| {
                        f.subtype_id = parse_id(&v);
                        f.category_id = None;
                    })} class={FIELD_CLASS}>
                        <option value="" selected={form.subtype_id.is_none()}>{"Selecione..."}</option>
                        { select_options(&subtypes, form.subtype_id) }
                    </select>
                </div>
                <div class="space-y-1">
                    <label class={LABEL_CLASS}>{"Categoria"}</label>
                    <select onchange={on_select(|f, v| f.category_id = parse_id(&v))} class={FIELD_CLASS}>
                        <option value="" selected={form.category_id.is_none()}>{"(Nenhuma)"}</option>
                        { select_options(&categories, form.category_id) }
                    </select>
                </div>
                <div class="space-y-1">
                    <label class={LABEL_CLASS}>{"Conta"}</label>
                    <select onchange={on_select(|f, v| f.account_id = parse_id(&v))} class={FIELD_CLASS}>
                        <option value="" selected={form.account_id.is_none()}>{"Geral"}</option>
                        { select_options(&accounts, form.account_id) }
                    </select>
                </div>
                <div class="space-y-1">
                    <label class={LABEL_CLASS}>{"Parcelas"}</label>
                    <input type="number" min="1" value={form.installments.clone()} oninput={on_text(|f, v| f.installments = v)} class={FIELD_CLASS} />
                </div>
                <div class="space-y-1">
                    <label class={LABEL_CLASS}>{"Comprovante"}</label>
                    <input type="file" onchange={on_file} class="w-full text-[12px]" />
                </div>
                <div class="col-span-2 flex justify-end pt-2">
                    <button type="button" onclick={on_save} class="px-4 py-2 rounded-lg bg-[#173E63] text-white text-sm font-bold">{"Salvar"}</button>
                </div>
            </div>
        },
    )
}

#[function_component(InvoicePaymentDialog)]
fn invoice_payment_dialog() -> Html {
    let controller = use_context::<Controller>();
    let today = controller
        .as_ref()
        .map(|c| c.state.borrow().today.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let date = use_state(move || today);
    let amount = use_state(String::new);
    let card = use_state(|| None::<i64>);
    let source = use_state(|| None::<i64>);
    let Some(controller) = controller else {
        return html! {};
    };

    let (cards, sources) = {
        let state = controller.state.borrow();
        (
            account_options(&state.snapshot, Some(true)),
            account_options(&state.snapshot, Some(false)),
        )
    };

    let id_setter = |handle: &UseStateHandle<Option<i64>>| {
        let handle = handle.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
            handle.set(parse_id(&input.value()));
        })
    };
    let on_close = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| controller.send(Command::CloseDialog))
    };
    let on_pay = {
        let controller = controller.clone();
        let (date, amount, card, source) =
            (date.clone(), amount.clone(), card.clone(), source.clone());
        Callback::from(move |_: MouseEvent| {
            controller.send(Command::PayInvoice(InvoicePaymentForm {
                date: (*date).clone(),
                amount: (*amount).clone(),
                card_id: *card,
                source_id: *source,
            }))
        })
    };

    dialog_panel(
        "Pagar fatura do cartão",
        on_close,
        html! {
            <div class="grid grid-cols-2 gap-3">
                <div class="space-y-1">
                    <label class={LABEL_CLASS}>{"Data"}</label>
                    <input type="date" value={(*date).clone()} oninput={input_setter(&date)} class={FIELD_CLASS} />
                </div>
                <div class="space-y-1">
                    <label class={LABEL_CLASS}>{"Valor"}</label>
                    <input type="text" inputmode="decimal" placeholder="0,00" value={(*amount).clone()} oninput={input_setter(&amount)} class={FIELD_CLASS} />
                </div>
                <div class="space-y-1">
                    <label class={LABEL_CLASS}>{"Cartão"}</label>
                    <select onchange={id_setter(&card)} class={FIELD_CLASS}>
                        <option value="" selected={card.is_none()}>{"Selecione..."}</option>
                        { select_options(&cards, *card) }
                    </select>
                </div>
                <div class="space-y-1">
                    <label class={LABEL_CLASS}>{"Pagar com"}</label>
                    <select onchange={id_setter(&source)} class={FIELD_CLASS}>
                        <option value="" selected={source.is_none()}>{"Selecione..."}</option>
                        { select_options(&sources, *source) }
                    </select>
                </div>
                <div class="col-span-2 flex justify-end pt-2">
                    <button type="button" onclick={on_pay} class="px-4 py-2 rounded-lg bg-[#173E63] text-white text-sm font-bold">{"Registrar pagamento"}</button>
                </div>
            </div>
        },
    )
}
