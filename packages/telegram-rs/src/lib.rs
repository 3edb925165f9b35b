// Thin wrapper over grammers for the login / send / profile calls the server needs.
//
// Every call builds its own client from a session string and drops it before
// returning, so no connection outlives a request.

pub mod errors;
pub mod models;
pub mod session;

use grammers_client::{Client, Config, InitParams, InputMessage};
use grammers_session::{PackedChat, PackedType, Session};
use grammers_tl_types as tl;
use tracing::{debug, info};

pub use crate::errors::TelegramError;
pub use crate::models::{Recipient, SentCode, SignInRequest, SignedIn, UserInfo};

#[derive(Clone)]
pub struct TelegramOptions {
    pub api_id: i32,
    pub api_hash: String,
}

impl std::fmt::Debug for TelegramOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramOptions")
            .field("api_id", &self.api_id)
            .field("api_hash", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct TelegramService {
    options: TelegramOptions,
}

impl TelegramService {
    pub fn new(options: TelegramOptions) -> Self {
        Self { options }
    }

    async fn connect(&self, session: Session) -> Result<Client, TelegramError> {
        let client = Client::connect(Config {
            session,
            api_id: self.options.api_id,
            api_hash: self.options.api_hash.clone(),
            params: InitParams::default(),
        })
        .await?;
        Ok(client)
    }

    async fn connect_with(&self, session_string: &str) -> Result<Client, TelegramError> {
        let session = session::decode(session_string)?;
        self.connect(session).await
    }

    /// Ask Telegram to send a login code to `phone_number`.
    ///
    /// The returned session must be handed back to [`Self::sign_in`]: the
    /// code hash is only valid for the authorization key that requested it.
    pub async fn send_code(&self, phone_number: &str) -> Result<SentCode, TelegramError> {
        let client = self.connect(Session::new()).await?;

        let request = tl::functions::auth::SendCode {
            phone_number: phone_number.to_string(),
            api_id: self.options.api_id,
            api_hash: self.options.api_hash.clone(),
            settings: tl::types::CodeSettings {
                allow_flashcall: false,
                current_number: false,
                allow_app_hash: false,
                allow_missed_call: false,
                allow_firebase: false,
                unknown_number: false,
                logout_tokens: None,
                token: None,
                app_sandbox: None,
            }
            .into(),
        };

        // Not logged in yet, so nothing to export: reconnect with a fresh key
        // homed in the data center that owns the number and ask again there.
        let first_attempt = client.invoke(&request).await;
        let (client, sent, dc_id) = match first_attempt {
            Ok(sent) => (client, sent, None),
            Err(e) => match TelegramError::migrate_dc(&e) {
                Some(dc_id) => {
                    debug!(dc_id, "Phone number lives in another data center");
                    drop(client);
                    let client = self.connect(session_homed_in(dc_id)).await?;
                    let sent = client.invoke(&request).await?;
                    (client, sent, Some(dc_id))
                }
                None => return Err(e.into()),
            },
        };

        let sent: tl::types::auth::SentCode = sent.try_into().map_err(|_| {
            TelegramError::UnexpectedResponse("auth.sendCode returned an authorization".to_string())
        })?;

        info!(dc_id = ?dc_id, "Login code requested");
        Ok(SentCode {
            phone_code_hash: sent.phone_code_hash,
            session: session::encode(client.session()),
            dc_id,
        })
    }

    /// Complete a login with the code the user received.
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<SignedIn, TelegramError> {
        let (session, dc_id) = sign_in_session(&request.session, request.dc_id)?;
        let client = self.connect(session).await?;

        let sign_in = tl::functions::auth::SignIn {
            phone_number: request.phone_number.clone(),
            phone_code_hash: request.phone_code_hash.clone(),
            phone_code: Some(request.code.clone()),
            email_verification: None,
        };

        let authorization = client.invoke(&sign_in).await?;

        let authorization: tl::types::auth::Authorization = authorization
            .try_into()
            .map_err(|_| TelegramError::SignUpRequired)?;
        let user: tl::types::User = authorization
            .user
            .try_into()
            .map_err(|_| TelegramError::InvalidSession("empty user".to_string()))?;

        let user = UserInfo::from(user);
        client.session().set_user(user.id, dc_id, false);

        info!(user_id = user.id, dc_id, "Signed in");
        Ok(SignedIn {
            session: session::encode(client.session()),
            user,
        })
    }

    /// Profile of the account that owns `session_string`.
    pub async fn get_me(&self, session_string: &str) -> Result<UserInfo, TelegramError> {
        let client = self.connect_with(session_string).await?;
        fetch_self(&client).await
    }

    /// Send a text message and return the id Telegram assigned to it.
    pub async fn send_message(
        &self,
        session_string: &str,
        recipient: &Recipient,
        text: &str,
    ) -> Result<i32, TelegramError> {
        let client = self.connect_with(session_string).await?;
        let chat = resolve(&client, recipient).await?;

        let message = client
            .send_message(chat, InputMessage::text(text))
            .await?;

        debug!(%recipient, message_id = message.id(), "Message sent");
        Ok(message.id())
    }
}

async fn fetch_self(client: &Client) -> Result<UserInfo, TelegramError> {
    let mut users = client
        .invoke(&tl::functions::users::GetUsers {
            id: vec![tl::enums::InputUser::UserSelf],
        })
        .await?;

    let user: tl::types::User = users
        .pop()
        .ok_or_else(|| TelegramError::InvalidSession("no current user".to_string()))?
        .try_into()
        .map_err(|_| TelegramError::InvalidSession("no current user".to_string()))?;

    Ok(UserInfo::from(user))
}

async fn resolve(client: &Client, recipient: &Recipient) -> Result<PackedChat, TelegramError> {
    match recipient {
        Recipient::Username(username) => client
            .resolve_username(username)
            .await?
            .map(|chat| chat.pack())
            .ok_or_else(|| TelegramError::RecipientNotFound(recipient.to_string())),
        Recipient::Phone(phone) => {
            let resolved = client
                .invoke(&tl::functions::contacts::ResolvePhone {
                    phone: phone.clone(),
                })
                .await?;
            let tl::enums::contacts::ResolvedPeer::Peer(resolved) = resolved;

            resolved
                .users
                .into_iter()
                .filter_map(|user| tl::types::User::try_from(user).ok())
                .find_map(|user| {
                    user.access_hash.map(|access_hash| PackedChat {
                        ty: PackedType::User,
                        id: user.id,
                        access_hash: Some(access_hash),
                    })
                })
                .ok_or_else(|| TelegramError::RecipientNotFound(recipient.to_string()))
        }
    }
}

/// A logged-out session whose connections go to `dc_id`.
///
/// grammers picks the data center from the session's user entry; the id stays
/// 0 until sign-in fills in the real account.
fn session_homed_in(dc_id: i32) -> Session {
    let session = Session::new();
    session.set_user(0, dc_id, false);
    session
}

/// Decode the session that requested the code and the data center to sign in on.
///
/// The session's own home wins; `dc_id` only applies to sessions that never
/// recorded one.
fn sign_in_session(
    session_string: &str,
    dc_id: Option<i32>,
) -> Result<(Session, i32), TelegramError> {
    let session = session::decode(session_string)?;
    let dc_id = match (session.get_user(), dc_id) {
        (Some(user), _) => user.dc,
        (None, Some(dc_id)) => {
            session.set_user(0, dc_id, false);
            dc_id
        }
        (None, None) => DEFAULT_DC,
    };
    Ok((session, dc_id))
}

const DEFAULT_DC: i32 = 2;
