use bb8::Pool;
use bb8_redis::RedisConnectionManager;

#[derive(Clone)]
pub struct AppState {
    pub redis: RedisClient,
}

pub type RedisClient = Pool<RedisConnectionManager>;
