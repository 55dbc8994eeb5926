//! Requests against the finance API and the gateway that sends them.

use futures_util::future::{join_all, try_join5};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use web_sys::{FormData, RequestCredentials};

use crate::error::UiError;
use crate::model::{
    Account, ApiMessage, Category, DueItem, Id, NewAccount, NewCategory, NewDueItem,
    NewSubtype, NewTransaction, Subtype, Transaction, TypeNode,
};
use crate::planning::PlanningTree;
use crate::settings::AppSettings;
use crate::store::{ConfigResource, Snapshot};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

/// One call the client can make. Built by the dispatcher, sent by [`Gateway`].
#[derive(Clone, Debug, PartialEq)]
pub enum ApiRequest {
    ListTransactions,
    CreateTransaction(NewTransaction),
    ToggleSettled(Id),
    DeleteTransaction(Id),
    ListTypes,
    ListConfig(ConfigResource),
    CreateSubtype(NewSubtype),
    CreateCategory(NewCategory),
    CreateAccount(NewAccount),
    DeleteConfig(ConfigResource, Id),
    ListDueItems,
    CreateDueItem(NewDueItem),
    ToggleDueItem(Id),
    DeleteDueItem(Id),
    ListYears,
    Planning(i32),
    Restore(web_sys::File),
    Reset,
}

enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<(&'static str, String)>, Option<web_sys::File>),
}

impl ApiRequest {
    pub fn method(&self) -> Method {
        use ApiRequest::*;
        match self {
            ListTransactions | ListTypes | ListConfig(_) | ListDueItems | ListYears
            | Planning(_) => Method::Get,
            CreateTransaction(_) | CreateSubtype(_) | CreateCategory(_) | CreateAccount(_)
            | CreateDueItem(_) | Restore(_) => Method::Post,
            ToggleSettled(_) | ToggleDueItem(_) => Method::Patch,
            DeleteTransaction(_) | DeleteConfig(..) | DeleteDueItem(_) | Reset => Method::Delete,
        }
    }

    pub fn path(&self) -> String {
        use ApiRequest::*;
        match self {
            ListTransactions | CreateTransaction(_) => "/api/lancamentos".to_string(),
            ToggleSettled(id) => format!("/api/lancamentos/{}/status", id),
            DeleteTransaction(id) => format!("/api/lancamentos/{}", id),
            ListTypes => "/api/config/tipos".to_string(),
            ListConfig(resource) => format!("/api/config/{}", resource.path_segment()),
            CreateSubtype(_) => config_path(ConfigResource::Subtypes),
            CreateCategory(_) => config_path(ConfigResource::Categories),
            CreateAccount(_) => config_path(ConfigResource::Accounts),
            DeleteConfig(resource, id) => format!("{}?id={}", config_path(*resource), id),
            ListDueItems | CreateDueItem(_) => "/api/vencimentos".to_string(),
            ToggleDueItem(id) => format!("/api/vencimentos/{}/toggle", id),
            DeleteDueItem(id) => format!("/api/vencimentos/{}", id),
            ListYears => "/api/anos_disponiveis".to_string(),
            Planning(year) => format!("/api/planejamento?ano={}", year),
            Restore(_) => "/api/manutencao/restore".to_string(),
            Reset => "/api/manutencao/reset".to_string(),
        }
    }

    /// Short human description, used when reporting partial failures.
    pub fn describe(&self) -> String {
        use ApiRequest::*;
        match self {
            CreateTransaction(tx) => format!("lançamento \"{}\"", tx.description),
            ToggleSettled(id) => format!("status do lançamento {}", id),
            DeleteTransaction(id) => format!("exclusão do lançamento {}", id),
            CreateSubtype(s) => format!("subtipo \"{}\"", s.name),
            CreateCategory(c) => format!("categoria \"{}\"", c.name),
            CreateAccount(a) => format!("conta \"{}\"", a.name),
            DeleteConfig(resource, id) => {
                format!("exclusão em {} ({})", resource.path_segment(), id)
            }
            CreateDueItem(v) => format!("vencimento \"{}\"", v.description),
            ToggleDueItem(id) => format!("status do vencimento {}", id),
            DeleteDueItem(id) => format!("exclusão do vencimento {}", id),
            Restore(_) => "restauração do backup".to_string(),
            Reset => "limpeza dos dados".to_string(),
            other => other.path(),
        }
    }

    fn body(&self) -> Result<Body, UiError> {
        use ApiRequest::*;
        let json = |value: Result<serde_json::Value, serde_json::Error>| {
            value
                .map(Body::Json)
                .map_err(|e| UiError::Invalid(e.to_string()))
        };
        match self {
            CreateTransaction(tx) => Ok(Body::Multipart(tx.form_fields(), tx.attachment.clone())),
            CreateSubtype(s) => json(serde_json::to_value(s)),
            CreateCategory(c) => json(serde_json::to_value(c)),
            CreateAccount(a) => json(serde_json::to_value(a)),
            CreateDueItem(v) => json(serde_json::to_value(v)),
            Restore(file) => Ok(Body::Multipart(vec![], Some(file.clone()))),
            _ => Ok(Body::Empty),
        }
    }
}

fn config_path(resource: ConfigResource) -> String {
    format!("/api/config/{}", resource.path_segment())
}

fn multipart(
    fields: &[(&'static str, String)],
    file: Option<&web_sys::File>,
) -> Result<FormData, UiError> {
    let js_err = |e: wasm_bindgen::JsValue| UiError::Invalid(format!("{:?}", e));
    let form = FormData::new().map_err(js_err)?;
    for (name, value) in fields {
        form.append_with_str(name, value).map_err(js_err)?;
    }
    if let Some(file) = file {
        form.append_with_blob_and_filename("arquivo", file, &file.name())
            .map_err(js_err)?;
    }
    Ok(form)
}

/// Sends [`ApiRequest`]s to the configured server.
#[derive(Clone, Debug, PartialEq)]
pub struct Gateway {
    settings: AppSettings,
}

impl Gateway {
    pub fn new(settings: AppSettings) -> Self {
        Gateway { settings }
    }

    fn builder(&self, request: &ApiRequest) -> RequestBuilder {
        let url = self.settings.url(&request.path());
        let builder = match request.method() {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Patch => Request::patch(&url),
            Method::Delete => Request::delete(&url),
        };
        builder.credentials(RequestCredentials::Include)
    }

    /// Sends one request. Non-OK statuses become [`UiError::Rejected`] carrying
    /// the server's `erro` message when it sent one.
    pub async fn send(&self, request: &ApiRequest) -> Result<Response, UiError> {
        log::debug!("{:?} {}", request.method(), request.path());
        let builder = self.builder(request);
        let prepared = match request.body()? {
            Body::Empty => builder.build()?,
            Body::Json(value) => builder.json(&value)?,
            Body::Multipart(fields, file) => builder.body(multipart(&fields, file.as_ref())?)?,
        };
        let response = prepared.send().await?;
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        let message = response.json::<ApiMessage>().await.ok().and_then(|m| m.erro);
        Err(UiError::rejected(status, message))
    }

    pub async fn fetch<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, UiError> {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }

    /// Sends a write and reads the `{"msg": ...}` acknowledgement. Servers that
    /// answer with an empty or non-JSON body still count as success.
    pub async fn submit(&self, request: &ApiRequest) -> Result<ApiMessage, UiError> {
        let response = self.send(request).await?;
        Ok(response.json::<ApiMessage>().await.unwrap_or_default())
    }

    /// Issues every request at once and waits for all of them.
    pub async fn submit_all(&self, requests: &[ApiRequest]) -> Vec<Result<ApiMessage, UiError>> {
        join_all(requests.iter().map(|r| self.submit(r))).await
    }

    pub async fn load_snapshot(&self) -> Result<Snapshot, UiError> {
        let (transactions, types, subtypes, categories, accounts) = try_join5(
            self.fetch::<Vec<Transaction>>(&ApiRequest::ListTransactions),
            self.fetch::<Vec<TypeNode>>(&ApiRequest::ListTypes),
            self.fetch::<Vec<Subtype>>(&ApiRequest::ListConfig(ConfigResource::Subtypes)),
            self.fetch::<Vec<Category>>(&ApiRequest::ListConfig(ConfigResource::Categories)),
            self.fetch::<Vec<Account>>(&ApiRequest::ListConfig(ConfigResource::Accounts)),
        )
        .await?;
        Ok(Snapshot {
            transactions,
            types,
            subtypes,
            categories,
            accounts,
        })
    }

    pub async fn load_due_items(&self) -> Result<Vec<DueItem>, UiError> {
        self.fetch(&ApiRequest::ListDueItems).await
    }

    pub async fn load_years(&self) -> Result<Vec<i32>, UiError> {
        self.fetch(&ApiRequest::ListYears).await
    }

    pub async fn load_planning(&self, year: i32) -> Result<PlanningTree, UiError> {
        self.fetch(&ApiRequest::Planning(year)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccountKind, DueKind};

    #[test]
    fn requests_map_to_documented_routes() {
        let cases = vec![
            (ApiRequest::ListTransactions, Method::Get, "/api/lancamentos"),
            (ApiRequest::ToggleSettled(4), Method::Patch, "/api/lancamentos/4/status"),
            (ApiRequest::DeleteTransaction(4), Method::Delete, "/api/lancamentos/4"),
            (ApiRequest::ListTypes, Method::Get, "/api/config/tipos"),
            (
                ApiRequest::ListConfig(ConfigResource::Accounts),
                Method::Get,
                "/api/config/contas",
            ),
            (
                ApiRequest::DeleteConfig(ConfigResource::Categories, 9),
                Method::Delete,
                "/api/config/categorias?id=9",
            ),
            (ApiRequest::ListDueItems, Method::Get, "/api/vencimentos"),
            (ApiRequest::ToggleDueItem(3), Method::Patch, "/api/vencimentos/3/toggle"),
            (ApiRequest::DeleteDueItem(3), Method::Delete, "/api/vencimentos/3"),
            (ApiRequest::ListYears, Method::Get, "/api/anos_disponiveis"),
            (ApiRequest::Planning(2024), Method::Get, "/api/planejamento?ano=2024"),
            (ApiRequest::Reset, Method::Delete, "/api/manutencao/reset"),
        ];
        for (request, method, path) in cases {
            assert_eq!(request.method(), method, "{}", path);
            assert_eq!(request.path(), path);
        }
    }

    #[test]
    fn create_requests_post_to_their_collections() {
        let subtype = ApiRequest::CreateSubtype(NewSubtype {
            name: "Lazer".to_string(),
            type_id: 2,
        });
        assert_eq!(subtype.method(), Method::Post);
        assert_eq!(subtype.path(), "/api/config/subtipos");
        assert_eq!(subtype.describe(), "subtipo \"Lazer\"");

        let account = ApiRequest::CreateAccount(NewAccount {
            name: "Nubank".to_string(),
            kind: AccountKind::CreditCard,
        });
        assert_eq!(account.path(), "/api/config/contas");

        let due = ApiRequest::CreateDueItem(NewDueItem {
            description: "Luz".to_string(),
            kind: DueKind::Fixed,
            day: Some(12),
            date: None,
        });
        assert_eq!(due.method(), Method::Post);
        assert_eq!(due.path(), "/api/vencimentos");
    }

    #[test]
    fn json_bodies_use_server_field_names() {
        let request = ApiRequest::CreateCategory(NewCategory {
            name: "Mercado".to_string(),
            subtype_id: 20,
        });
        match request.body().unwrap() {
            Body::Json(value) => assert_eq!(
                value,
                serde_json::json!({"nome": "Mercado", "subtipo_id": 20})
            ),
            _ => panic!("expected a json body"),
        }
        assert!(matches!(ApiRequest::ListTypes.body().unwrap(), Body::Empty));
    }
}
