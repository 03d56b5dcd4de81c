//! Construction of single-shot request descriptors.

use reqwest::Method;
use reqwest::header::{
    ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, IntoHeaderName, USER_AGENT,
};
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};

/// Override header sent in place of a literal DELETE verb.
///
/// Some HTTP intermediaries reject DELETE outright; the API honours this
/// override on a plain POST instead.
const METHOD_OVERRIDE: &str = "x-http-method-override";

/// A fully-formed request: built fresh per call, immutable afterwards, owned
/// by the operation that built it.
///
/// Authentication is baked in at construction time from the [`Config`]
/// snapshot: an authenticated config contributes a bearer `Authorization`
/// header, an unauthenticated one a `key` query parameter — never both.
#[derive(Debug)]
pub(crate) struct RequestDescriptor {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Option<String>,
}

impl RequestDescriptor {
    /// A GET request.
    ///
    /// The "(gzip)" user-agent suffix opts into compressed responses from
    /// Google's frontends; the transport negotiates the actual encoding.
    pub(crate) fn get(config: &Config, path: &[&str], params: &[(&str, String)]) -> Result<Self> {
        let url = build_url(config, path, params)?;
        let mut headers = HeaderMap::new();
        insert(&mut headers, USER_AGENT, &format!("{} (gzip)", config.user_agent))?;
        insert(&mut headers, ACCEPT, &config.accept)?;
        add_auth(&mut headers, config)?;
        Ok(Self {
            method: Method::GET,
            url,
            headers,
            body: None,
        })
    }

    /// A POST request, with a JSON body when the endpoint takes one.
    pub(crate) fn post(
        config: &Config,
        path: &[&str],
        params: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Self> {
        let url = build_url(config, path, params)?;
        let mut headers = HeaderMap::new();
        insert(&mut headers, USER_AGENT, &config.user_agent)?;
        if body.is_some() {
            insert(&mut headers, CONTENT_TYPE, "application/json")?;
        }
        add_auth(&mut headers, config)?;
        Ok(Self {
            method: Method::POST,
            url,
            headers,
            body: body.map(Value::to_string),
        })
    }

    /// A DELETE, modeled as an empty POST carrying the method-override header.
    pub(crate) fn delete(
        config: &Config,
        path: &[&str],
        params: &[(&str, String)],
    ) -> Result<Self> {
        let url = build_url(config, path, params)?;
        let mut headers = HeaderMap::new();
        insert(&mut headers, USER_AGENT, &config.user_agent)?;
        insert(&mut headers, METHOD_OVERRIDE, "DELETE")?;
        add_auth(&mut headers, config)?;
        Ok(Self {
            method: Method::POST,
            url,
            headers,
            body: None,
        })
    }
}

fn build_url(config: &Config, path: &[&str], params: &[(&str, String)]) -> Result<Url> {
    let mut url = config.api_root.clone();
    url.path_segments_mut()
        .map_err(|_| Error::InvalidApiRoot(format!("{} cannot be a base", config.api_root)))?
        .pop_if_empty()
        .extend(path.iter().copied());
    {
        let mut query = url.query_pairs_mut();
        for (name, value) in params {
            query.append_pair(name, value);
        }
        if !config.authenticated {
            query.append_pair("key", &config.api_key);
        }
    }
    Ok(url)
}

fn add_auth(headers: &mut HeaderMap, config: &Config) -> Result<()> {
    if config.authenticated {
        insert(
            headers,
            AUTHORIZATION,
            &format!("Bearer {}", config.access_token),
        )?;
    }
    Ok(())
}

fn insert<K>(headers: &mut HeaderMap, name: K, value: &str) -> Result<()>
where
    K: IntoHeaderName,
{
    headers.insert(name, HeaderValue::from_str(value)?);
    Ok(())
}
