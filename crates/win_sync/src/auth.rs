// 与原站一致的单操作员凭据，只是界面层的门槛
// 真正的安全边界是远端仓库校验的访问令牌，见 api::routes::auth
const OPERATOR_USERNAME: &str = "Роман";
const OPERATOR_PASSWORD: &str = "22";

/// 进程内的认证状态，不落盘，进程重启即失效
#[derive(Debug, Default)]
pub struct AuthGate {
    authenticated: bool,
}

impl AuthGate {
    /// 凭据精确匹配才置位；失败不提示是用户名还是密码错了
    pub fn attempt(&mut self, username: &str, password: &str) -> bool {
        let matched = username == OPERATOR_USERNAME && password == OPERATOR_PASSWORD;
        if matched {
            self.authenticated = true;
        }
        matched
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}
