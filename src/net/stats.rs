//! 网络统计信息

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub delivered_pkts: u64,
    pub delivered_bytes: u64,
    /// 路由器查不到路由而丢弃
    pub dropped_no_route: u64,
    /// 数据包到达了非目的主机
    pub dropped_wrong_host: u64,
    /// 出端口的链路已断开
    pub dropped_link_down: u64,
    /// 因链路断开而丢失的路由协议报文
    pub lost_control: u64,
    pub advertisements_sent: u64,
    pub link_events: u64,
}

impl Stats {
    /// 所有原因丢弃的数据包
    pub fn dropped_data(&self) -> u64 {
        self.dropped_no_route + self.dropped_wrong_host + self.dropped_link_down
    }
}
