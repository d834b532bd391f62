use axum::async_trait;
use tracing::info;

#[derive(Debug, Clone)]
pub struct OutboundMail {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub body: String,
}

/// Outbound transactional mail. The relay endpoints only ever talk to this
/// trait; the transport behind it is deployment wiring.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutboundMail) -> anyhow::Result<()>;
}

/// Logs outbound mail instead of delivering it.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutboundMail) -> anyhow::Result<()> {
        info!(
            to = %mail.to,
            reply_to = mail.reply_to.as_deref().unwrap_or("-"),
            subject = %mail.subject,
            "outbound mail (log transport)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_mailer_accepts_mail() {
        let mail = OutboundMail {
            to: "admin@example.com".into(),
            reply_to: Some("visitor@example.com".into()),
            subject: "Nouveau contact".into(),
            body: "hello".into(),
        };
        LogMailer.send(mail).await.unwrap();
    }
}
