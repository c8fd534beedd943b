use std::io::Read;

use super::{RemoteSource, TransportError};

/// [`RemoteSource`] backed by `ureq` agents.
///
/// The agents are built once and reused for every request of a run, so
/// connections to the remote host are pooled. No timeout is configured
/// beyond the transport default.
pub struct HttpRemote {
    agent: ureq::Agent,
    // HEAD answers are taken as-is: a redirect means the file is not at
    // the probed path.
    head_agent: ureq::Agent,
    user_agent: String,
}

impl HttpRemote {
    pub fn new(user_agent: impl Into<String>) -> Self {
        // Statuses are inspected by the caller; a 404 on HEAD is an answer,
        // not a failure.
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build();
        let agent: ureq::Agent = config.into();
        let head_config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .build();
        let head_agent: ureq::Agent = head_config.into();

        Self {
            agent,
            head_agent,
            user_agent: user_agent.into(),
        }
    }
}

impl RemoteSource for HttpRemote {
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let mut response = self
            .agent
            .get(url)
            .header("User-Agent", &self.user_agent)
            .call()
            .map_err(|source| TransportError::Transport(source.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(TransportError::Status(status));
        }

        // Model files routinely exceed ureq's default in-memory read limit,
        // so read through the unlimited reader.
        let mut bytes = Vec::new();
        response
            .body_mut()
            .as_reader()
            .read_to_end(&mut bytes)
            .map_err(|source| TransportError::Transport(source.to_string()))?;
        Ok(bytes)
    }

    fn head_status(&self, url: &str) -> Result<u16, TransportError> {
        let response = self
            .head_agent
            .head(url)
            .header("User-Agent", &self.user_agent)
            .call()
            .map_err(|source| TransportError::Transport(source.to_string()))?;
        Ok(response.status().as_u16())
    }
}
