//! Postal code lookup.

use async_trait::async_trait;
use serde::Deserialize;
use vitrine_commerce::{Address, PostalCode};

use crate::client::{FetchClient, FetchError, HttpTransport};
use crate::transport::DefaultTransport;

/// Public ViaCEP endpoint.
pub const VIACEP_BASE_URL: &str = "https://viacep.com.br";

/// The three ways a lookup can end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The service resolved the code.
    Found(Address),
    /// The service answered that the code does not exist.
    NotFound,
    /// The request or its decoding failed.
    Failed(FetchError),
}

/// Resolves a CEP to an address with a single request.
#[async_trait(?Send)]
pub trait PostalLookup {
    async fn lookup(&self, code: &PostalCode) -> LookupOutcome;
}

#[async_trait(?Send)]
impl<L: PostalLookup + ?Sized> PostalLookup for &L {
    async fn lookup(&self, code: &PostalCode) -> LookupOutcome {
        (**self).lookup(code).await
    }
}

/// ViaCEP response body.
///
/// Unknown codes come back as `{"erro": true}` (older deployments send
/// `"true"`). Any other payload is read as an address, with missing or null
/// fields left empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ViaCepResponse {
    pub erro: Option<serde_json::Value>,
    pub cep: Option<String>,
    pub logradouro: Option<String>,
    pub bairro: Option<String>,
    pub localidade: Option<String>,
    pub uf: Option<String>,
}

impl ViaCepResponse {
    /// Whether the `erro` marker is set, using JavaScript truthiness.
    pub fn is_not_found(&self) -> bool {
        match &self.erro {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(s)) => !s.is_empty(),
            Some(serde_json::Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(_) => true,
        }
    }

    /// Map the body to a lookup outcome.
    pub fn into_outcome(self) -> LookupOutcome {
        if self.is_not_found() {
            return LookupOutcome::NotFound;
        }
        LookupOutcome::Found(Address {
            street: self.logradouro.unwrap_or_default(),
            neighborhood: self.bairro.unwrap_or_default(),
            city: self.localidade.unwrap_or_default(),
            state: self.uf.unwrap_or_default(),
            postal_code: self.cep.unwrap_or_default(),
        })
    }
}

/// ViaCEP client.
///
/// # Example
///
/// ```rust,ignore
/// let client = ViaCepClient::new();
/// let code = PostalCode::parse("01310-100")?;
/// match client.lookup(&code).await {
///     LookupOutcome::Found(address) => println!("{}", address.multi_line()),
///     LookupOutcome::NotFound => println!("CEP não encontrado"),
///     LookupOutcome::Failed(e) => println!("lookup failed: {}", e),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ViaCepClient<T = DefaultTransport> {
    client: FetchClient<T>,
    base_url: String,
}

impl ViaCepClient<DefaultTransport> {
    /// Client for the public endpoint on the default transport.
    pub fn new() -> Self {
        Self::with_client(FetchClient::new())
    }
}

impl Default for ViaCepClient<DefaultTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HttpTransport> ViaCepClient<T> {
    /// Client for the public endpoint on an explicit fetch client.
    pub fn with_client(client: FetchClient<T>) -> Self {
        Self {
            client,
            base_url: VIACEP_BASE_URL.to_string(),
        }
    }

    /// Point at another deployment (or a test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The base URL requests are made against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request URL for `code`.
    pub fn url_for(&self, code: &PostalCode) -> String {
        format!(
            "{}/ws/{}/json/",
            self.base_url.trim_end_matches('/'),
            code.as_str()
        )
    }
}

#[async_trait(?Send)]
impl<T: HttpTransport> PostalLookup for ViaCepClient<T> {
    async fn lookup(&self, code: &PostalCode) -> LookupOutcome {
        match self.client.fetch::<ViaCepResponse>(&self.url_for(code)).await {
            Ok(body) => body.into_outcome(),
            Err(e) => LookupOutcome::Failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpResponse;
    use std::cell::RefCell;

    struct Recorded {
        response: Result<HttpResponse, FetchError>,
        urls: RefCell<Vec<String>>,
    }

    impl Recorded {
        fn new(response: Result<HttpResponse, FetchError>) -> Self {
            Self {
                response,
                urls: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for Recorded {
        async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
            self.urls.borrow_mut().push(url.to_string());
            self.response.clone()
        }
    }

    const PAULISTA: &str = r#"{
        "cep": "01310-100",
        "logradouro": "Avenida Paulista",
        "complemento": "de 612 a 1510 - lado par",
        "bairro": "Bela Vista",
        "localidade": "São Paulo",
        "uf": "SP",
        "ibge": "3550308"
    }"#;

    fn code() -> PostalCode {
        PostalCode::parse("01310-100").unwrap()
    }

    #[tokio::test]
    async fn test_found_mirrors_response_fields() {
        let transport = Recorded::new(Ok(HttpResponse::new(200, PAULISTA)));
        let client = ViaCepClient::with_client(FetchClient::with_transport(&transport));

        let outcome = client.lookup(&code()).await;

        assert_eq!(
            outcome,
            LookupOutcome::Found(Address::new(
                "Avenida Paulista",
                "Bela Vista",
                "São Paulo",
                "SP",
                "01310-100"
            ))
        );
        assert_eq!(
            transport.urls.borrow().as_slice(),
            ["https://viacep.com.br/ws/01310100/json/"]
        );
    }

    #[tokio::test]
    async fn test_erro_flag_is_not_found() {
        for body in [r#"{"erro": true}"#, r#"{"erro": "true"}"#] {
            let transport = Recorded::new(Ok(HttpResponse::new(200, body)));
            let client = ViaCepClient::with_client(FetchClient::with_transport(&transport));
            assert_eq!(client.lookup(&code()).await, LookupOutcome::NotFound);
        }
    }

    #[tokio::test]
    async fn test_transport_and_parse_failures() {
        let transport = Recorded::new(Err(FetchError::Connection("reset".to_string())));
        let client = ViaCepClient::with_client(FetchClient::with_transport(&transport));
        assert_eq!(
            client.lookup(&code()).await,
            LookupOutcome::Failed(FetchError::Connection("reset".to_string()))
        );

        let transport = Recorded::new(Ok(HttpResponse::new(200, "not json")));
        let client = ViaCepClient::with_client(FetchClient::with_transport(&transport));
        assert!(matches!(
            client.lookup(&code()).await,
            LookupOutcome::Failed(FetchError::Deserialization(_))
        ));

        let transport = Recorded::new(Ok(HttpResponse::new(500, "{}")));
        let client = ViaCepClient::with_client(FetchClient::with_transport(&transport));
        assert!(matches!(
            client.lookup(&code()).await,
            LookupOutcome::Failed(FetchError::Http { status: 500, .. })
        ));
    }

    #[test]
    fn test_falsy_erro_values_are_not_flags() {
        for erro in ["false", "null", "0", r#""""#] {
            let body: ViaCepResponse =
                serde_json::from_str(&format!(r#"{{"erro": {}, "uf": "RJ"}}"#, erro)).unwrap();
            assert!(!body.is_not_found(), "erro = {}", erro);
        }
    }

    #[test]
    fn test_null_fields_become_empty() {
        let body: ViaCepResponse =
            serde_json::from_str(r#"{"cep": "70000-000", "logradouro": null, "uf": "DF"}"#).unwrap();
        match body.into_outcome() {
            LookupOutcome::Found(address) => {
                assert_eq!(address.street, "");
                assert_eq!(address.state, "DF");
                assert_eq!(address.postal_code, "70000-000");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_url_for_trims_trailing_slash() {
        let client = ViaCepClient::with_client(FetchClient::with_transport(Recorded::new(Err(
            FetchError::Request("unused".to_string()),
        ))))
        .with_base_url("http://localhost:9000/");
        assert_eq!(client.url_for(&code()), "http://localhost:9000/ws/01310100/json/");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn test_default_transport_against_local_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ws/01310100/json/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(PAULISTA)
            .create_async()
            .await;

        let client = ViaCepClient::new().with_base_url(server.url());
        let outcome = client.lookup(&code()).await;

        assert!(matches!(outcome, LookupOutcome::Found(ref a) if a.city == "São Paulo"));
        mock.assert_async().await;
    }
}
