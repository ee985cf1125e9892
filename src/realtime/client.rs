// WebSocket 客户端
// 单一任务持有连接，通过命令通道订阅/离开频道，通过事件通道上报

use std::collections::HashSet;

use futures_util::sink::Sink;
use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use serde_json::Value;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};

use super::auth::ChannelAuthorizer;
use super::protocol::{ClientFrame, ServerFrame};
use super::state::ConnectionEvent;
use super::ChannelSubscriber;
use crate::error::RealtimeError;

/// 上报给页面的事件
#[derive(Debug, Clone, PartialEq)]
pub enum RealtimeEvent {
    /// 连接/订阅状态变化，channel 为空表示整个连接
    Connection {
        channel: Option<String>,
        event: ConnectionEvent,
    },
    /// 频道业务事件
    Message {
        channel: String,
        event: String,
        data: Value,
    },
}

#[derive(Debug)]
enum Command {
    Subscribe(String),
    Leave(String),
    Disconnect,
}

/// 连接句柄，drop 前应调用 `disconnect`
pub struct RealtimeHandle {
    commands: UnboundedSender<Command>,
    task: JoinHandle<()>,
}

impl RealtimeHandle {
    /// 订阅私有频道，socket 建立前的订阅会排队
    pub fn subscribe(&self, channel: &str) {
        if self.commands.send(Command::Subscribe(channel.to_string())).is_err() {
            warn!("Realtime connection already closed, cannot subscribe {}", channel);
        }
    }

    /// 离开频道
    pub fn leave(&self, channel: &str) {
        if self.commands.send(Command::Leave(channel.to_string())).is_err() {
            debug!("Realtime connection already closed, nothing to leave");
        }
    }

    /// 关闭连接并等待任务结束
    pub async fn disconnect(self) {
        let _ = self.commands.send(Command::Disconnect);
        if let Err(err) = self.task.await {
            error!("Realtime task ended abnormally: {}", err);
        }
    }
}

impl ChannelSubscriber for RealtimeHandle {
    fn subscribe(&self, channel: &str) {
        RealtimeHandle::subscribe(self, channel)
    }

    fn leave(&self, channel: &str) {
        RealtimeHandle::leave(self, channel)
    }
}

/// 建立连接并启动读写任务
///
/// # Arguments
/// * `url` - `ws(s)://host:port/app/{key}?protocol=7...`
/// * `authorizer` - 私有频道授权
///
/// # Returns
/// * 连接句柄与事件接收端
pub async fn connect(
    url: &str,
    authorizer: ChannelAuthorizer,
) -> Result<(RealtimeHandle, UnboundedReceiver<RealtimeEvent>), RealtimeError> {
    let (stream, _) = connect_async(url).await?;
    info!("Realtime socket opened: {}", url);

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let task = tokio::spawn(async move {
        let (write, read) = stream.split();
        let mut connection = Connection {
            authorizer,
            events: event_tx,
            socket_id: None,
            pending: Vec::new(),
            channels: HashSet::new(),
        };
        connection.run(write, read, command_rx).await;
    });

    Ok((
        RealtimeHandle {
            commands: command_tx,
            task,
        },
        event_rx,
    ))
}

struct Connection {
    authorizer: ChannelAuthorizer,
    events: UnboundedSender<RealtimeEvent>,
    socket_id: Option<String>,
    /// 等待 socket_id 的频道
    pending: Vec<String>,
    /// 已发送订阅的频道
    channels: HashSet<String>,
}

impl Connection {
    async fn run<W, R>(&mut self, mut write: W, mut read: R, mut commands: UnboundedReceiver<Command>)
    where
        W: Sink<Message, Error = tungstenite::Error> + Unpin,
        R: futures_util::Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
    {
        self.emit_connection(None, ConnectionEvent::SocketOpened);

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Subscribe(channel)) => {
                        if let Err(err) = self.subscribe(&mut write, channel).await {
                            self.fail(err);
                            break;
                        }
                    }
                    Some(Command::Leave(channel)) => {
                        if let Err(err) = self.leave(&mut write, &channel).await {
                            self.fail(err);
                            break;
                        }
                    }
                    Some(Command::Disconnect) | None => {
                        let _ = write.close().await;
                        self.emit_connection(None, ConnectionEvent::Closed);
                        info!("Realtime socket closed");
                        break;
                    }
                },
                message = read.next() => match message {
                    Some(Ok(Message::Text(text))) => {
                        if let Err(err) = self.handle_text(&mut write, &text).await {
                            self.fail(err);
                            break;
                        }
                    }
                    Some(Ok(Message::Ping(payload))) => {
                        if let Err(err) = write.send(Message::Pong(payload)).await {
                            self.fail(err.into());
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        warn!("Realtime socket closed by server");
                        self.emit_connection(None, ConnectionEvent::Closed);
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        self.fail(err.into());
                        break;
                    }
                },
            }
        }
    }

    async fn handle_text<W>(&mut self, write: &mut W, text: &str) -> Result<(), RealtimeError>
    where
        W: Sink<Message, Error = tungstenite::Error> + Unpin,
    {
        let frame = match ServerFrame::parse(text) {
            Ok(frame) => frame,
            Err(err) => {
                warn!("Ignoring malformed frame: {}", err);
                return Ok(());
            }
        };

        match frame {
            ServerFrame::ConnectionEstablished { socket_id, .. } => {
                debug!("Connection established, socket id {}", socket_id);
                self.socket_id = Some(socket_id);
                for channel in std::mem::take(&mut self.pending) {
                    self.subscribe(write, channel).await?;
                }
            }
            ServerFrame::SubscriptionSucceeded { channel } => {
                info!("Subscribed to {}", channel);
                self.emit_connection(Some(channel), ConnectionEvent::SubscriptionSucceeded);
            }
            ServerFrame::SubscriptionError { channel, status, error } => {
                error!("Subscription error for {:?} ({:?}): {}", channel, status, error);
                if let Some(channel) = &channel {
                    self.channels.remove(channel);
                }
                self.emit_connection(channel, ConnectionEvent::SubscriptionFailed(error));
            }
            ServerFrame::Error { code, message } => {
                error!("Realtime server error {:?}: {}", code, message);
                self.emit_connection(None, ConnectionEvent::Failed(message));
            }
            ServerFrame::Ping => {
                write.send(Message::Text(ClientFrame::Pong.encode())).await?;
            }
            ServerFrame::Pong => {}
            ServerFrame::ChannelEvent { channel, event, data } => {
                if self.channels.contains(&channel) {
                    let _ = self.events.send(RealtimeEvent::Message { channel, event, data });
                }
            }
        }
        Ok(())
    }

    async fn subscribe<W>(&mut self, write: &mut W, channel: String) -> Result<(), RealtimeError>
    where
        W: Sink<Message, Error = tungstenite::Error> + Unpin,
    {
        if self.channels.contains(&channel) {
            return Ok(());
        }
        let socket_id = match &self.socket_id {
            Some(id) => id.clone(),
            None => {
                if !self.pending.contains(&channel) {
                    self.pending.push(channel);
                }
                return Ok(());
            }
        };

        self.emit_connection(Some(channel.clone()), ConnectionEvent::Connecting);
        let auth = match self.authorizer.authorize(&socket_id, &channel).await {
            Ok(auth) => auth,
            Err(err) => {
                self.emit_connection(Some(channel), ConnectionEvent::SubscriptionFailed(err.to_string()));
                return Ok(());
            }
        };

        let frame = ClientFrame::Subscribe {
            channel: channel.clone(),
            auth,
        };
        write.send(Message::Text(frame.encode())).await?;
        self.channels.insert(channel);
        Ok(())
    }

    async fn leave<W>(&mut self, write: &mut W, channel: &str) -> Result<(), RealtimeError>
    where
        W: Sink<Message, Error = tungstenite::Error> + Unpin,
    {
        self.pending.retain(|pending| pending != channel);
        if self.channels.remove(channel) {
            let frame = ClientFrame::Unsubscribe {
                channel: channel.to_string(),
            };
            write.send(Message::Text(frame.encode())).await?;
            info!("Left channel {}", channel);
        }
        self.emit_connection(Some(channel.to_string()), ConnectionEvent::Left);
        Ok(())
    }

    fn fail(&self, err: RealtimeError) {
        error!("Realtime connection failed: {}", err);
        self.emit_connection(None, ConnectionEvent::Failed(err.to_string()));
    }

    fn emit_connection(&self, channel: Option<String>, event: ConnectionEvent) {
        let _ = self.events.send(RealtimeEvent::Connection { channel, event });
    }
}
